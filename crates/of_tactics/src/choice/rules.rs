//! Exclusion rules for multi-select choice sets
//!
//! Three relationships, all static:
//! - direct opposites: never chosen together (stored both ways)
//! - implies unavailable: choosing A hides B while A stays chosen
//! - clears all others: choosing A empties the set first

use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionRuleTable<C: Ord> {
    direct_opposite: BTreeMap<C, BTreeSet<C>>,
    implies_unavailable: BTreeMap<C, BTreeSet<C>>,
    clears_all_others: BTreeSet<C>,
}

impl<C: Ord + Copy> ExclusionRuleTable<C> {
    pub fn builder() -> ExclusionRuleBuilder<C> {
        ExclusionRuleBuilder { table: Self::empty() }
    }

    pub fn empty() -> Self {
        Self {
            direct_opposite: BTreeMap::new(),
            implies_unavailable: BTreeMap::new(),
            clears_all_others: BTreeSet::new(),
        }
    }

    pub fn opposites_of(&self, option: C) -> impl Iterator<Item = C> + '_ {
        self.direct_opposite.get(&option).into_iter().flatten().copied()
    }

    pub fn hidden_by(&self, option: C) -> impl Iterator<Item = C> + '_ {
        self.implies_unavailable.get(&option).into_iter().flatten().copied()
    }

    pub fn are_opposites(&self, a: C, b: C) -> bool {
        self.direct_opposite.get(&a).map_or(false, |set| set.contains(&b))
    }

    pub fn implies(&self, chosen: C, hidden: C) -> bool {
        self.implies_unavailable.get(&chosen).map_or(false, |set| set.contains(&hidden))
    }

    pub fn clears_all_others(&self, option: C) -> bool {
        self.clears_all_others.contains(&option)
    }

    /// Options that cannot be picked while `chosen` is held.
    ///
    /// `u` is unavailable iff some chosen `c != u` hides it, or `u` clears all
    /// others, is not chosen, and conflicts with a chosen non-clearing option.
    pub fn compute_unavailable(&self, domain: &[C], chosen: &BTreeSet<C>) -> BTreeSet<C> {
        domain
            .iter()
            .copied()
            .filter(|&u| {
                let hidden = chosen.iter().any(|&c| c != u && self.implies(c, u));
                let blocked_clearer = self.clears_all_others(u)
                    && !chosen.contains(&u)
                    && chosen.iter().any(|&c| {
                        !self.clears_all_others(c) && (self.implies(u, c) || self.are_opposites(c, u))
                    });
                hidden || blocked_clearer
            })
            .collect()
    }

    /// Check that no reachable selection can hold an option it also hides.
    ///
    /// Every "implies" edge must be mirrored unless its source clears the set
    /// on selection, and an option may not be its own opposite.
    pub fn check_consistency(&self) -> Result<(), String> {
        for (a, opposites) in &self.direct_opposite {
            if opposites.contains(a) {
                return Err("option listed as its own opposite".to_string());
            }
            if opposites.iter().any(|b| !self.are_opposites(*b, *a)) {
                return Err("direct opposite stored one way only".to_string());
            }
        }
        for (a, hidden) in &self.implies_unavailable {
            if self.clears_all_others(*a) {
                continue;
            }
            if hidden.iter().any(|b| b != a && !self.implies(*b, *a)) {
                return Err("implies-unavailable edge is not mirrored".to_string());
            }
        }
        Ok(())
    }
}

pub struct ExclusionRuleBuilder<C: Ord> {
    table: ExclusionRuleTable<C>,
}

impl<C: Ord + Copy> ExclusionRuleBuilder<C> {
    /// `a` and `b` can never both be chosen
    pub fn opposites(mut self, a: C, b: C) -> Self {
        self.table.direct_opposite.entry(a).or_default().insert(b);
        self.table.direct_opposite.entry(b).or_default().insert(a);
        self
    }

    /// Choosing `option` hides every member of `hidden`
    pub fn implies_unavailable(mut self, option: C, hidden: &[C]) -> Self {
        self.table.implies_unavailable.entry(option).or_default().extend(hidden.iter().copied());
        self
    }

    /// Choosing `option` first empties the set
    pub fn clears_all_others(mut self, option: C) -> Self {
        self.table.clears_all_others.insert(option);
        self
    }

    pub fn build(self) -> ExclusionRuleTable<C> {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposites_are_symmetric() {
        let table = ExclusionRuleTable::builder().opposites(1u8, 2).build();
        assert!(table.are_opposites(1, 2));
        assert!(table.are_opposites(2, 1));
        assert_eq!(table.opposites_of(2).collect::<Vec<_>>(), vec![1]);
        assert!(table.check_consistency().is_ok());
    }

    #[test]
    fn test_implied_options_are_unavailable() {
        let table = ExclusionRuleTable::builder()
            .implies_unavailable(1u8, &[3])
            .implies_unavailable(2, &[3])
            .implies_unavailable(3, &[1, 2])
            .build();
        let domain = [1u8, 2, 3];

        let chosen: BTreeSet<u8> = [1, 2].into_iter().collect();
        assert_eq!(table.compute_unavailable(&domain, &chosen), [3].into_iter().collect());

        let chosen: BTreeSet<u8> = [2].into_iter().collect();
        assert_eq!(table.compute_unavailable(&domain, &chosen), [3].into_iter().collect());

        assert!(table.compute_unavailable(&domain, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_clearing_option_blocked_by_conflicting_choice() {
        // 0은 전체 초기화 옵션, 1과는 반대 관계만 존재
        let table = ExclusionRuleTable::builder().clears_all_others(0u8).opposites(0, 1).build();
        let domain = [0u8, 1, 2];

        let chosen: BTreeSet<u8> = [1].into_iter().collect();
        assert_eq!(table.compute_unavailable(&domain, &chosen), [0].into_iter().collect());

        let chosen: BTreeSet<u8> = [2].into_iter().collect();
        assert!(table.compute_unavailable(&domain, &chosen).is_empty());
    }

    #[test]
    fn test_one_way_implication_is_inconsistent() {
        let table = ExclusionRuleTable::builder().implies_unavailable(1u8, &[2]).build();
        assert!(table.check_consistency().is_err());

        let table = ExclusionRuleTable::builder()
            .clears_all_others(1u8)
            .implies_unavailable(1, &[2])
            .build();
        assert!(table.check_consistency().is_ok());
    }
}
