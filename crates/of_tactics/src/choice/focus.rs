//! Team attacking choices
//!
//! 플레이 방향(PlayFocus)과 기회 창출(ChanceCreation) 선택 세트

use super::rules::ExclusionRuleTable;
use super::set::{ChoiceOption, ChoiceSet, ChoiceSetId};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Where the team directs its attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayFocus {
    LeftFlank,
    RightFlank,
    ThroughTheMiddle,
    OverlapLeft,
    UnderlapLeft,
    OverlapRight,
    UnderlapRight,
    PlayOutOfDefense,
}

impl PlayFocus {
    pub const ALL: [PlayFocus; 8] = [
        PlayFocus::LeftFlank,
        PlayFocus::RightFlank,
        PlayFocus::ThroughTheMiddle,
        PlayFocus::OverlapLeft,
        PlayFocus::UnderlapLeft,
        PlayFocus::OverlapRight,
        PlayFocus::UnderlapRight,
        PlayFocus::PlayOutOfDefense,
    ];

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            PlayFocus::LeftFlank => "왼쪽 측면 공략",
            PlayFocus::RightFlank => "오른쪽 측면 공략",
            PlayFocus::ThroughTheMiddle => "중앙 돌파",
            PlayFocus::OverlapLeft => "왼쪽 오버랩",
            PlayFocus::UnderlapLeft => "왼쪽 언더랩",
            PlayFocus::OverlapRight => "오른쪽 오버랩",
            PlayFocus::UnderlapRight => "오른쪽 언더랩",
            PlayFocus::PlayOutOfDefense => "후방 빌드업",
        }
    }
}

/// How the team finishes attacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanceCreation {
    WorkIntoBox,
    ShootOnSight,
    HitEarlyCrosses,
}

impl ChanceCreation {
    pub const ALL: [ChanceCreation; 3] =
        [ChanceCreation::WorkIntoBox, ChanceCreation::ShootOnSight, ChanceCreation::HitEarlyCrosses];

    pub fn display_name_ko(&self) -> &'static str {
        match self {
            ChanceCreation::WorkIntoBox => "박스 안까지 침투",
            ChanceCreation::ShootOnSight => "보이면 슈팅",
            ChanceCreation::HitEarlyCrosses => "얼리 크로스",
        }
    }
}

static PLAY_FOCUS_RULES: Lazy<ExclusionRuleTable<PlayFocus>> = Lazy::new(|| {
    use PlayFocus::*;
    ExclusionRuleTable::builder()
        .implies_unavailable(LeftFlank, &[ThroughTheMiddle])
        .implies_unavailable(RightFlank, &[ThroughTheMiddle])
        .implies_unavailable(ThroughTheMiddle, &[LeftFlank, RightFlank])
        .opposites(OverlapLeft, UnderlapLeft)
        .opposites(OverlapRight, UnderlapRight)
        .build()
});

static CHANCE_CREATION_RULES: Lazy<ExclusionRuleTable<ChanceCreation>> = Lazy::new(|| {
    use ChanceCreation::*;
    ExclusionRuleTable::builder()
        .clears_all_others(WorkIntoBox)
        .implies_unavailable(WorkIntoBox, &[ShootOnSight, HitEarlyCrosses])
        .implies_unavailable(ShootOnSight, &[WorkIntoBox])
        .implies_unavailable(HitEarlyCrosses, &[WorkIntoBox])
        .build()
});

/// Choice sets owned by one profile. Player profiles carry none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChoiceSets {
    pub play_focus: Option<ChoiceSet<PlayFocus>>,
    pub chance_creation: Option<ChoiceSet<ChanceCreation>>,
}

impl ChoiceSets {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn team() -> Self {
        Self { play_focus: Some(ChoiceSet::new()), chance_creation: Some(ChoiceSet::new()) }
    }

    pub fn ids(&self) -> Vec<ChoiceSetId> {
        let mut ids = Vec::new();
        if self.play_focus.is_some() {
            ids.push(ChoiceSetId::PlayFocus);
        }
        if self.chance_creation.is_some() {
            ids.push(ChoiceSetId::ChanceCreation);
        }
        ids
    }
}

impl ChoiceOption for PlayFocus {
    const SET: ChoiceSetId = ChoiceSetId::PlayFocus;

    fn all() -> &'static [Self] {
        &PlayFocus::ALL
    }

    fn rules() -> &'static ExclusionRuleTable<Self> {
        &PLAY_FOCUS_RULES
    }

    fn name(&self) -> &'static str {
        match self {
            PlayFocus::LeftFlank => "left_flank",
            PlayFocus::RightFlank => "right_flank",
            PlayFocus::ThroughTheMiddle => "through_the_middle",
            PlayFocus::OverlapLeft => "overlap_left",
            PlayFocus::UnderlapLeft => "underlap_left",
            PlayFocus::OverlapRight => "overlap_right",
            PlayFocus::UnderlapRight => "underlap_right",
            PlayFocus::PlayOutOfDefense => "play_out_of_defense",
        }
    }

    fn select(sets: &ChoiceSets) -> Option<&ChoiceSet<Self>> {
        sets.play_focus.as_ref()
    }

    fn select_mut(sets: &mut ChoiceSets) -> Option<&mut ChoiceSet<Self>> {
        sets.play_focus.as_mut()
    }
}

impl ChoiceOption for ChanceCreation {
    const SET: ChoiceSetId = ChoiceSetId::ChanceCreation;

    fn all() -> &'static [Self] {
        &ChanceCreation::ALL
    }

    fn rules() -> &'static ExclusionRuleTable<Self> {
        &CHANCE_CREATION_RULES
    }

    fn name(&self) -> &'static str {
        match self {
            ChanceCreation::WorkIntoBox => "work_into_box",
            ChanceCreation::ShootOnSight => "shoot_on_sight",
            ChanceCreation::HitEarlyCrosses => "hit_early_crosses",
        }
    }

    fn select(sets: &ChoiceSets) -> Option<&ChoiceSet<Self>> {
        sets.chance_creation.as_ref()
    }

    fn select_mut(sets: &mut ChoiceSets) -> Option<&mut ChoiceSet<Self>> {
        sets.chance_creation.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TacticError;
    use std::collections::BTreeSet;

    fn set_of<C: Ord + Copy>(items: &[C]) -> BTreeSet<C> {
        items.iter().copied().collect()
    }

    #[test]
    fn test_rule_tables_are_consistent() {
        assert_eq!(PlayFocus::rules().check_consistency(), Ok(()));
        assert_eq!(ChanceCreation::rules().check_consistency(), Ok(()));
    }

    #[test]
    fn test_chance_creation_scenario() {
        use ChanceCreation::*;
        let mut set = ChoiceSet::<ChanceCreation>::new();

        set.add(WorkIntoBox).unwrap();
        assert_eq!(set.chosen(), &set_of(&[WorkIntoBox]));
        assert_eq!(set.unavailable(), &set_of(&[ShootOnSight, HitEarlyCrosses]));

        let before = set.clone();
        let err = set.add(ShootOnSight).unwrap_err();
        assert_eq!(
            err,
            TacticError::OptionUnavailable { set: ChoiceSetId::ChanceCreation, option: "shoot_on_sight" }
        );
        assert_eq!(set, before);

        set.remove(WorkIntoBox);
        assert!(set.chosen().is_empty());
        assert!(set.unavailable().is_empty());

        set.add(ShootOnSight).unwrap();
        assert_eq!(set.chosen(), &set_of(&[ShootOnSight]));
        assert_eq!(set.unavailable(), &set_of(&[WorkIntoBox]));
    }

    #[test]
    fn test_chance_creation_non_clearing_options_coexist() {
        use ChanceCreation::*;
        let mut set = ChoiceSet::<ChanceCreation>::new();

        set.add(ShootOnSight).unwrap();
        set.add(HitEarlyCrosses).unwrap();
        assert_eq!(set.chosen(), &set_of(&[ShootOnSight, HitEarlyCrosses]));

        // 둘 다 제거해야 박스 침투 가능
        set.remove(ShootOnSight);
        assert!(!set.is_available(WorkIntoBox));
        let delta = set.remove(HitEarlyCrosses);
        assert_eq!(delta.became_available, vec![WorkIntoBox]);
        assert!(set.is_available(WorkIntoBox));
    }

    #[test]
    fn test_play_focus_scenario() {
        use PlayFocus::*;
        let mut set = ChoiceSet::<PlayFocus>::new();

        set.add(LeftFlank).unwrap();
        assert_eq!(set.chosen(), &set_of(&[LeftFlank]));
        assert!(set.is_available(RightFlank));
        assert!(!set.is_available(ThroughTheMiddle));

        set.add(RightFlank).unwrap();
        assert_eq!(set.chosen(), &set_of(&[LeftFlank, RightFlank]));
        assert!(!set.is_available(ThroughTheMiddle));

        set.remove(LeftFlank);
        assert!(set.is_chosen(RightFlank));
        assert!(!set.is_available(ThroughTheMiddle));

        let delta = set.remove(RightFlank);
        assert!(set.is_available(ThroughTheMiddle));
        assert_eq!(delta.became_available, vec![ThroughTheMiddle]);
    }

    #[test]
    fn test_through_the_middle_hides_both_flanks() {
        use PlayFocus::*;
        let mut set = ChoiceSet::<PlayFocus>::new();

        let delta = set.add(ThroughTheMiddle).unwrap();
        assert_eq!(delta.became_unavailable, vec![LeftFlank, RightFlank]);
        assert!(set.add(LeftFlank).is_err());
    }

    #[test]
    fn test_direct_opposite_is_displaced() {
        use PlayFocus::*;
        let mut set = ChoiceSet::<PlayFocus>::new();
        set.add(OverlapLeft).unwrap();
        set.add(PlayOutOfDefense).unwrap();

        let delta = set.add(UnderlapLeft).unwrap();
        assert_eq!(delta.displaced, vec![OverlapLeft]);
        assert_eq!(set.chosen(), &set_of(&[UnderlapLeft, PlayOutOfDefense]));
        assert!(set.unavailable().is_empty());
    }

    #[test]
    fn test_add_twice_and_remove_absent_are_noops() {
        use PlayFocus::*;
        let mut set = ChoiceSet::<PlayFocus>::new();
        set.add(OverlapRight).unwrap();
        let once = set.clone();

        assert!(set.add(OverlapRight).unwrap().is_empty());
        assert!(set.remove(UnderlapRight).is_empty());
        assert_eq!(set, once);
    }

    #[test]
    fn test_clear_restores_full_availability() {
        use ChanceCreation::*;
        let mut set = ChoiceSet::<ChanceCreation>::new();
        set.add(WorkIntoBox).unwrap();

        let delta = set.clear();
        assert_eq!(delta.displaced, vec![WorkIntoBox]);
        assert_eq!(delta.became_available, vec![ShootOnSight, HitEarlyCrosses]);
        assert_eq!(set, ChoiceSet::new());
    }

    #[test]
    fn test_from_parts_rejects_inconsistent_sets() {
        use ChanceCreation::*;

        assert!(ChoiceSet::from_parts(set_of(&[WorkIntoBox]), set_of(&[ShootOnSight, HitEarlyCrosses]))
            .is_ok());
        // unavailable 누락
        assert!(matches!(
            ChoiceSet::from_parts(set_of(&[WorkIntoBox]), BTreeSet::new()),
            Err(TacticError::InvalidSnapshot(_))
        ));
        // chosen ∩ unavailable
        assert!(ChoiceSet::from_parts(set_of(&[WorkIntoBox, ShootOnSight]), set_of(&[WorkIntoBox]))
            .is_err());
        assert!(ChoiceSet::<PlayFocus>::from_parts(
            set_of(&[PlayFocus::OverlapLeft, PlayFocus::UnderlapLeft]),
            BTreeSet::new()
        )
        .is_err());
    }

    #[test]
    fn test_choice_set_json_shape() {
        let mut set = ChoiceSet::<ChanceCreation>::new();
        set.add(ChanceCreation::WorkIntoBox).unwrap();

        insta::assert_json_snapshot!(set, @r###"
        {
          "chosen": [
            "work_into_box"
          ],
          "unavailable": [
            "shoot_on_sight",
            "hit_early_crosses"
          ]
        }
        "###);
    }

    #[test]
    fn test_team_sets() {
        let sets = ChoiceSets::team();
        assert_eq!(sets.ids(), vec![ChoiceSetId::PlayFocus, ChoiceSetId::ChanceCreation]);
        assert!(PlayFocus::select(&sets).is_some());
        assert!(ChanceCreation::select(&ChoiceSets::none()).is_none());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn play_focus() -> impl Strategy<Value = PlayFocus> {
            proptest::sample::select(PlayFocus::ALL.to_vec())
        }

        fn chance_creation() -> impl Strategy<Value = ChanceCreation> {
            proptest::sample::select(ChanceCreation::ALL.to_vec())
        }

        fn holds_invariants<C: ChoiceOption>(set: &ChoiceSet<C>) -> bool {
            let disjoint = set.chosen().is_disjoint(set.unavailable());
            let no_opposites = set
                .chosen()
                .iter()
                .all(|a| C::rules().opposites_of(*a).all(|b| !set.chosen().contains(&b)));
            disjoint && no_opposites
        }

        proptest! {
            /// Property: chosen ∩ unavailable = ∅ and no opposites held, for any edit order
            #[test]
            fn prop_play_focus_invariants(
                ops in proptest::collection::vec((any::<bool>(), play_focus()), 0..50)
            ) {
                let mut set = ChoiceSet::<PlayFocus>::new();
                for (add, option) in ops {
                    if add {
                        let before = set.clone();
                        if set.add(option).is_err() {
                            prop_assert_eq!(&set, &before);
                        }
                    } else {
                        set.remove(option);
                    }
                    prop_assert!(holds_invariants(&set));
                }
            }

            #[test]
            fn prop_chance_creation_invariants(
                ops in proptest::collection::vec((any::<bool>(), chance_creation()), 0..50)
            ) {
                let mut set = ChoiceSet::<ChanceCreation>::new();
                for (add, option) in ops {
                    if add {
                        let _ = set.add(option);
                    } else {
                        set.remove(option);
                    }
                    prop_assert!(holds_invariants(&set));
                    prop_assert!(ChoiceSet::from_parts(set.chosen().clone(), set.unavailable().clone()).is_ok());
                }
            }
        }
    }
}
