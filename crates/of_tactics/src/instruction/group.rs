//! Instruction Group
//!
//! Schema-driven collection of option slots for one tactical context.
//! Every per-kind accessor goes through the same code path; the schema table
//! decides which kinds exist and what their defaults are.

use super::kinds::{InstructionValue, OptionKind, OptionValue};
use super::schema::{GroupId, GroupSchema};
use super::slot::{Availability, OptionSlot, RequiredPolicy, SlotRejection};
use crate::error::{Result, TacticError};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    kind: OptionKind,
    default: OptionValue,
    slot: OptionSlot<OptionValue>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionGroup {
    id: GroupId,
    entries: Vec<Entry>,
}

impl InstructionGroup {
    /// Build the group's slots in schema order.
    /// Slots declared Required take `policy` as their write policy.
    pub fn from_schema(schema: &GroupSchema, policy: RequiredPolicy) -> Result<Self> {
        if let Some(kind) = schema.duplicate_kind() {
            return Err(TacticError::InvalidSchema(format!(
                "{} lists {} more than once",
                schema.id, kind
            )));
        }

        let entries = schema
            .entries
            .iter()
            .map(|entry| {
                let mut slot = OptionSlot::new(policy);
                match entry.initial {
                    Availability::Unavailable => {}
                    Availability::Available => {
                        slot.make_available(entry.default);
                    }
                    Availability::Required => {
                        slot.make_required_default(entry.default);
                    }
                }
                Entry { kind: entry.kind(), default: entry.default, slot }
            })
            .collect();

        Ok(Self { id: schema.id, entries })
    }

    /// Rebuild a group from stored slots. The kinds must be exactly the
    /// schema's kinds, each once; values must belong to their kind.
    pub fn from_slots(
        schema: &GroupSchema,
        slots: Vec<(OptionKind, OptionSlot<OptionValue>)>,
    ) -> Result<Self> {
        if let Some(kind) = schema.duplicate_kind() {
            return Err(TacticError::InvalidSchema(format!(
                "{} lists {} more than once",
                schema.id, kind
            )));
        }
        if slots.len() != schema.entries.len() {
            return Err(TacticError::InvalidSnapshot(format!(
                "{} expects {} slots, got {}",
                schema.id,
                schema.entries.len(),
                slots.len()
            )));
        }

        let mut entries = Vec::with_capacity(slots.len());
        for entry in schema.entries {
            let kind = entry.kind();
            let mut matching = slots.iter().filter(|(k, _)| *k == kind);
            let slot = match (matching.next(), matching.next()) {
                (Some((_, slot)), None) => slot.clone(),
                (None, _) => {
                    return Err(TacticError::InvalidSnapshot(format!(
                        "{} is missing slot {}",
                        schema.id, kind
                    )))
                }
                (Some(_), Some(_)) => {
                    return Err(TacticError::InvalidSnapshot(format!(
                        "{} has slot {} twice",
                        schema.id, kind
                    )))
                }
            };
            if let Some(value) = slot.value() {
                if value.kind() != kind {
                    return Err(TacticError::InvalidSnapshot(format!(
                        "{} slot {} holds a {} value",
                        schema.id,
                        kind,
                        value.kind()
                    )));
                }
            }
            entries.push(Entry { kind, default: entry.default, slot });
        }

        Ok(Self { id: schema.id, entries })
    }

    pub fn id(&self) -> GroupId {
        self.id
    }

    pub fn kinds(&self) -> impl Iterator<Item = OptionKind> + '_ {
        self.entries.iter().map(|e| e.kind)
    }

    pub fn contains(&self, kind: OptionKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Slots in schema order
    pub fn slots(&self) -> impl Iterator<Item = (OptionKind, &OptionSlot<OptionValue>)> + '_ {
        self.entries.iter().map(|e| (e.kind, &e.slot))
    }

    pub fn slot(&self, kind: OptionKind) -> Option<&OptionSlot<OptionValue>> {
        self.entries.iter().find(|e| e.kind == kind).map(|e| &e.slot)
    }

    pub fn availability(&self, kind: OptionKind) -> Result<Availability> {
        Ok(self.entry(kind)?.slot.availability())
    }

    pub fn value(&self, kind: OptionKind) -> Result<Option<OptionValue>> {
        Ok(self.entry(kind)?.slot.value().copied())
    }

    /// Typed read, e.g. `group.get::<TacklingStyle>()`
    pub fn get<T: InstructionValue>(&self) -> Option<T> {
        self.slot(T::KIND).and_then(|slot| slot.value().copied()).and_then(T::from_value)
    }

    /// Typed write, e.g. `group.set(TacklingStyle::StayOnFeet)`
    pub fn set<T: InstructionValue>(&mut self, value: T) -> Result<bool> {
        self.set_value(value.into())
    }

    pub fn set_value(&mut self, value: OptionValue) -> Result<bool> {
        let kind = value.kind();
        let entry = self.entry_mut(kind)?;
        entry.slot.set_value(value).map_err(|rejection| match rejection {
            SlotRejection::NotAvailable => TacticError::NotAvailable { kind },
            SlotRejection::Locked => TacticError::Locked { kind },
        })
    }

    /// Make `kind` Available with its schema default
    pub fn make_available(&mut self, kind: OptionKind) -> Result<bool> {
        let entry = self.entry_mut(kind)?;
        let default = entry.default;
        Ok(entry.slot.make_available(default))
    }

    /// Make the value's kind Available holding `value`
    pub fn make_available_with(&mut self, value: OptionValue) -> Result<bool> {
        Ok(self.entry_mut(value.kind())?.slot.make_available(value))
    }

    pub fn make_unavailable(&mut self, kind: OptionKind) -> Result<bool> {
        Ok(self.entry_mut(kind)?.slot.make_unavailable())
    }

    pub fn make_required_default(&mut self, value: OptionValue) -> Result<bool> {
        Ok(self.entry_mut(value.kind())?.slot.make_required_default(value))
    }

    pub fn make_required_with(&mut self, value: OptionValue, policy: RequiredPolicy) -> Result<bool> {
        Ok(self.entry_mut(value.kind())?.slot.make_required_with(value, policy))
    }

    /// Required -> Available on every slot; returns the released kinds
    pub fn release_required_all(&mut self) -> Vec<OptionKind> {
        self.entries
            .iter_mut()
            .filter_map(|e| e.slot.release_required().then_some(e.kind))
            .collect()
    }

    /// Every slot Available with its schema default.
    /// Returns the kinds whose availability changed.
    pub fn make_all_available(&mut self) -> Vec<OptionKind> {
        self.apply_all(|entry| {
            let default = entry.default;
            entry.slot.make_available(default);
        })
    }

    /// Every slot Unavailable. Returns the kinds whose availability changed.
    pub fn make_all_unavailable(&mut self) -> Vec<OptionKind> {
        self.apply_all(|entry| {
            entry.slot.make_unavailable();
        })
    }

    /// All Required slots hold a value
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(|e| e.slot.is_satisfied())
    }

    pub fn missing_required(&self) -> Vec<OptionKind> {
        self.entries.iter().filter(|e| !e.slot.is_satisfied()).map(|e| e.kind).collect()
    }

    // 스테이징 복사본에 적용 후 한 번에 교체
    fn apply_all(&mut self, op: impl Fn(&mut Entry)) -> Vec<OptionKind> {
        let mut staged = self.entries.clone();
        let mut changed = Vec::new();
        for entry in staged.iter_mut() {
            let before = entry.slot.availability();
            op(entry);
            if entry.slot.availability() != before {
                changed.push(entry.kind);
            }
        }
        self.entries = staged;
        changed
    }

    fn entry(&self, kind: OptionKind) -> Result<&Entry> {
        let id = self.id;
        self.entries
            .iter()
            .find(|e| e.kind == kind)
            .ok_or(TacticError::UnknownOption { group: id, kind })
    }

    fn entry_mut(&mut self, kind: OptionKind) -> Result<&mut Entry> {
        let id = self.id;
        self.entries
            .iter_mut()
            .find(|e| e.kind == kind)
            .ok_or(TacticError::UnknownOption { group: id, kind })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::schema::SchemaEntry;
    use crate::player::{DefensiveWork, PressingIntensity, ShootingTendency, TacklingStyle};

    static TACKLING_REQUIRED: GroupSchema = GroupSchema {
        id: GroupId::OnOppositionHasBall,
        entries: &[
            SchemaEntry::available(OptionValue::DefensiveWork(DefensiveWork::Normal)),
            SchemaEntry::unavailable(OptionValue::Pressing(PressingIntensity::Medium)),
            SchemaEntry::required(OptionValue::Tackling(TacklingStyle::Balanced)),
        ],
    };

    fn opposition_group() -> InstructionGroup {
        InstructionGroup::from_schema(GroupId::OnOppositionHasBall.schema(), RequiredPolicy::Locked)
            .unwrap()
    }

    #[test]
    fn test_from_schema_applies_initial_state() {
        let group = InstructionGroup::from_schema(&TACKLING_REQUIRED, RequiredPolicy::Locked).unwrap();

        assert_eq!(group.availability(OptionKind::DefensiveWork), Ok(Availability::Available));
        assert_eq!(group.availability(OptionKind::Pressing), Ok(Availability::Unavailable));
        assert_eq!(group.value(OptionKind::Pressing), Ok(None));
        assert_eq!(group.get::<TacklingStyle>(), Some(TacklingStyle::Balanced));
        assert!(group.is_complete());
    }

    #[test]
    fn test_duplicate_schema_is_rejected() {
        static DUPLICATED: GroupSchema = GroupSchema {
            id: GroupId::OnOppositionHasBall,
            entries: &[
                SchemaEntry::available(OptionValue::Tackling(TacklingStyle::Balanced)),
                SchemaEntry::available(OptionValue::Tackling(TacklingStyle::StayOnFeet)),
            ],
        };
        let err = InstructionGroup::from_schema(&DUPLICATED, RequiredPolicy::Locked).unwrap_err();
        assert!(matches!(err, TacticError::InvalidSchema(_)));
    }

    #[test]
    fn test_required_default_locked_rejects_set() {
        let mut group =
            InstructionGroup::from_schema(&TACKLING_REQUIRED, RequiredPolicy::Locked).unwrap();

        let result = group.set(TacklingStyle::TackleHarder);

        assert_eq!(result, Err(TacticError::Locked { kind: OptionKind::Tackling }));
        assert_eq!(group.get::<TacklingStyle>(), Some(TacklingStyle::Balanced));
        assert_eq!(group.availability(OptionKind::Tackling), Ok(Availability::Required));
    }

    #[test]
    fn test_required_default_editable_accepts_set() {
        let mut group =
            InstructionGroup::from_schema(&TACKLING_REQUIRED, RequiredPolicy::Editable).unwrap();

        let result = group.set(TacklingStyle::TackleHarder);

        assert_eq!(result, Ok(true));
        assert_eq!(group.get::<TacklingStyle>(), Some(TacklingStyle::TackleHarder));
        assert_eq!(group.availability(OptionKind::Tackling), Ok(Availability::Required));
    }

    #[test]
    fn test_write_to_unavailable_kind() {
        let mut group =
            InstructionGroup::from_schema(&TACKLING_REQUIRED, RequiredPolicy::Locked).unwrap();

        let result = group.set(PressingIntensity::High);
        assert_eq!(result, Err(TacticError::NotAvailable { kind: OptionKind::Pressing }));
        assert_eq!(group.get::<PressingIntensity>(), None);
    }

    #[test]
    fn test_unknown_kind() {
        let mut group = opposition_group();

        let err = group.set(ShootingTendency::ShootOnSight).unwrap_err();
        assert_eq!(
            err,
            TacticError::UnknownOption {
                group: GroupId::OnOppositionHasBall,
                kind: OptionKind::Shooting
            }
        );
        assert!(group.make_unavailable(OptionKind::Passing).is_err());
    }

    #[test]
    fn test_make_all_unavailable_then_available() {
        let mut group = opposition_group();
        group.set(TacklingStyle::StayOnFeet).unwrap();

        let changed = group.make_all_unavailable();
        assert_eq!(changed.len(), 3);
        assert!(group.slots().all(|(_, s)| s.value().is_none()));

        // 두 번째 호출은 변화 없음
        assert!(group.make_all_unavailable().is_empty());

        let changed = group.make_all_available();
        assert_eq!(changed.len(), 3);
        assert_eq!(group.get::<TacklingStyle>(), Some(TacklingStyle::Balanced));
    }

    #[test]
    fn test_make_all_available_reports_only_availability_changes() {
        let mut group =
            InstructionGroup::from_schema(&TACKLING_REQUIRED, RequiredPolicy::Locked).unwrap();

        let changed = group.make_all_available();
        assert_eq!(changed, vec![OptionKind::Pressing, OptionKind::Tackling]);
    }

    #[test]
    fn test_release_required_all() {
        let mut group = opposition_group();
        group.make_required_default(TacklingStyle::TackleHarder.into()).unwrap();

        assert_eq!(group.release_required_all(), vec![OptionKind::Tackling]);
        assert_eq!(group.availability(OptionKind::Tackling), Ok(Availability::Available));
        assert_eq!(group.get::<TacklingStyle>(), Some(TacklingStyle::TackleHarder));
    }

    #[test]
    fn test_from_slots_round_trip() {
        let mut group = opposition_group();
        group.set(DefensiveWork::High).unwrap();
        group.make_unavailable(OptionKind::Pressing).unwrap();

        let slots = group.slots().map(|(k, s)| (k, s.clone())).collect();
        let restored = InstructionGroup::from_slots(group.id().schema(), slots).unwrap();
        assert_eq!(restored, group);
    }

    #[test]
    fn test_from_slots_rejects_missing_and_foreign_values() {
        let group = opposition_group();

        let mut slots: Vec<_> = group.slots().map(|(k, s)| (k, s.clone())).collect();
        slots.pop();
        assert!(matches!(
            InstructionGroup::from_slots(group.id().schema(), slots),
            Err(TacticError::InvalidSnapshot(_))
        ));

        let mut slots: Vec<_> = group.slots().map(|(k, s)| (k, s.clone())).collect();
        slots[0].1 = OptionSlot::from_parts(
            Some(OptionValue::Tackling(TacklingStyle::Balanced)),
            Availability::Available,
            RequiredPolicy::Locked,
        )
        .unwrap();
        assert!(matches!(
            InstructionGroup::from_slots(group.id().schema(), slots),
            Err(TacticError::InvalidSnapshot(_))
        ));
    }
}
