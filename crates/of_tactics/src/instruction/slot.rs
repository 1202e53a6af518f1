//! Option Slot
//!
//! A single tactical parameter with tri-state availability.
//! - Unavailable: value is always None, nothing can be written
//! - Available: holds a value the coach may change freely
//! - Required: holds a value mandated by a role (writable only under `RequiredPolicy::Editable`)

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an option may currently be edited at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    Unavailable,
    Available,
    Required,
}

impl fmt::Display for Availability {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Availability::Unavailable => write!(f, "unavailable"),
            Availability::Available => write!(f, "available"),
            Availability::Required => write!(f, "required"),
        }
    }
}

/// How a Required slot reacts to user writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredPolicy {
    /// Role fixes the value; writes are rejected
    #[default]
    Locked,
    /// Role demands a value but the coach may pick which one
    Editable,
}

/// Why a slot refused a write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRejection {
    NotAvailable,
    Locked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSlot<V> {
    value: Option<V>,
    availability: Availability,
    policy: RequiredPolicy,
}

impl<V: Clone + PartialEq> OptionSlot<V> {
    /// New slot in the Unavailable state
    pub fn new(policy: RequiredPolicy) -> Self {
        Self { value: None, availability: Availability::Unavailable, policy }
    }

    /// Rebuild a slot from stored parts. Returns None when the parts break the
    /// `Unavailable ⇔ value == None` invariant.
    pub fn from_parts(
        value: Option<V>,
        availability: Availability,
        policy: RequiredPolicy,
    ) -> Option<Self> {
        let unavailable = availability == Availability::Unavailable;
        if unavailable != value.is_none() {
            return None;
        }
        Some(Self { value, availability, policy })
    }

    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn policy(&self) -> RequiredPolicy {
        self.policy
    }

    /// True if `set_value` would currently succeed
    pub fn is_writable(&self) -> bool {
        match self.availability {
            Availability::Unavailable => false,
            Availability::Available => true,
            Availability::Required => self.policy == RequiredPolicy::Editable,
        }
    }

    /// Required slots must hold a value
    pub fn is_satisfied(&self) -> bool {
        self.availability != Availability::Required || self.value.is_some()
    }

    /// Store a new value. Availability never changes.
    pub fn set_value(&mut self, value: V) -> Result<bool, SlotRejection> {
        match self.availability {
            Availability::Unavailable => return Err(SlotRejection::NotAvailable),
            Availability::Required if self.policy == RequiredPolicy::Locked => {
                return Err(SlotRejection::Locked)
            }
            _ => {}
        }

        let changed = self.value.as_ref() != Some(&value);
        self.value = Some(value);
        Ok(changed)
    }

    pub fn make_available(&mut self, default: V) -> bool {
        self.transition(Availability::Available, Some(default))
    }

    pub fn make_unavailable(&mut self) -> bool {
        self.transition(Availability::Unavailable, None)
    }

    /// Mark Required with a role-mandated value, keeping the slot's policy
    pub fn make_required_default(&mut self, value: V) -> bool {
        self.transition(Availability::Required, Some(value))
    }

    /// Mark Required with a role-mandated value under an explicit policy
    pub fn make_required_with(&mut self, value: V, policy: RequiredPolicy) -> bool {
        let policy_changed = self.policy != policy;
        self.policy = policy;
        self.transition(Availability::Required, Some(value)) || policy_changed
    }

    /// Required -> Available, keeping the value. No-op otherwise.
    pub fn release_required(&mut self) -> bool {
        if self.availability != Availability::Required {
            return false;
        }
        self.availability = Availability::Available;
        true
    }

    fn transition(&mut self, availability: Availability, value: Option<V>) -> bool {
        let changed = self.availability != availability || self.value != value;
        self.availability = availability;
        self.value = value;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invariant_holds<V: Clone + PartialEq>(slot: &OptionSlot<V>) -> bool {
        (slot.availability() == Availability::Unavailable) == slot.value().is_none()
    }

    #[test]
    fn test_new_slot_is_unavailable() {
        let slot: OptionSlot<u8> = OptionSlot::new(RequiredPolicy::Locked);
        assert_eq!(slot.availability(), Availability::Unavailable);
        assert_eq!(slot.value(), None);
        assert!(slot.is_satisfied());
    }

    #[test]
    fn test_write_to_unavailable_slot_is_rejected() {
        let mut slot = OptionSlot::new(RequiredPolicy::Locked);
        assert_eq!(slot.set_value(3u8), Err(SlotRejection::NotAvailable));
        assert_eq!(slot.value(), None);
    }

    #[test]
    fn test_make_available_is_idempotent() {
        let mut slot = OptionSlot::new(RequiredPolicy::Locked);
        assert!(slot.make_available(1u8));
        let once = slot.clone();

        assert!(!slot.make_available(1u8));
        assert_eq!(slot, once);
    }

    #[test]
    fn test_make_available_resets_to_default() {
        let mut slot = OptionSlot::new(RequiredPolicy::Locked);
        slot.make_available(1u8);
        slot.set_value(5).unwrap();

        assert!(slot.make_available(1));
        assert_eq!(slot.value(), Some(&1));
    }

    #[test]
    fn test_locked_required_rejects_writes() {
        let mut slot = OptionSlot::new(RequiredPolicy::Locked);
        slot.make_required_default(2u8);

        assert_eq!(slot.set_value(4), Err(SlotRejection::Locked));
        assert_eq!(slot.value(), Some(&2));
        assert_eq!(slot.availability(), Availability::Required);
    }

    #[test]
    fn test_editable_required_accepts_writes() {
        let mut slot = OptionSlot::new(RequiredPolicy::Editable);
        slot.make_required_default(2u8);

        assert_eq!(slot.set_value(4), Ok(true));
        assert_eq!(slot.value(), Some(&4));
        assert_eq!(slot.availability(), Availability::Required);
    }

    #[test]
    fn test_required_with_overrides_policy() {
        let mut slot = OptionSlot::new(RequiredPolicy::Locked);
        slot.make_required_with(2u8, RequiredPolicy::Editable);

        assert_eq!(slot.policy(), RequiredPolicy::Editable);
        assert!(slot.is_writable());
    }

    #[test]
    fn test_release_required_keeps_value() {
        let mut slot = OptionSlot::new(RequiredPolicy::Locked);
        slot.make_required_default(7u8);

        assert!(slot.release_required());
        assert_eq!(slot.availability(), Availability::Available);
        assert_eq!(slot.value(), Some(&7));
        assert!(!slot.release_required());
    }

    #[test]
    fn test_from_parts_rejects_broken_invariant() {
        assert!(OptionSlot::from_parts(Some(1u8), Availability::Unavailable, RequiredPolicy::Locked)
            .is_none());
        assert!(OptionSlot::<u8>::from_parts(None, Availability::Available, RequiredPolicy::Locked)
            .is_none());
        assert!(OptionSlot::from_parts(Some(1u8), Availability::Required, RequiredPolicy::Locked)
            .is_some());
    }

    #[test]
    fn test_unset_value_only_when_unavailable() {
        let mut slot = OptionSlot::new(RequiredPolicy::Editable);
        assert!(invariant_holds(&slot));
        slot.make_available(0u8);
        assert!(invariant_holds(&slot));
        slot.make_required_default(1);
        assert!(invariant_holds(&slot));
        slot.make_unavailable();
        assert!(invariant_holds(&slot));
        let _ = slot.set_value(9);
        assert!(invariant_holds(&slot));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum SlotOp {
            Set(u8),
            Available(u8),
            Unavailable,
            Required(u8),
            Release,
        }

        fn op_strategy() -> impl Strategy<Value = SlotOp> {
            prop_oneof![
                any::<u8>().prop_map(SlotOp::Set),
                any::<u8>().prop_map(SlotOp::Available),
                Just(SlotOp::Unavailable),
                any::<u8>().prop_map(SlotOp::Required),
                Just(SlotOp::Release),
            ]
        }

        proptest! {
            /// Property: value is unset exactly when the slot is Unavailable
            #[test]
            fn prop_unavailable_iff_unset(
                ops in proptest::collection::vec(op_strategy(), 0..40),
                editable in any::<bool>()
            ) {
                let policy = if editable { RequiredPolicy::Editable } else { RequiredPolicy::Locked };
                let mut slot = OptionSlot::new(policy);
                for op in ops {
                    let before = slot.clone();
                    match op {
                        SlotOp::Set(v) => {
                            if slot.set_value(v).is_err() {
                                prop_assert_eq!(&slot, &before);
                            }
                        }
                        SlotOp::Available(v) => { slot.make_available(v); }
                        SlotOp::Unavailable => { slot.make_unavailable(); }
                        SlotOp::Required(v) => { slot.make_required_default(v); }
                        SlotOp::Release => { slot.release_required(); }
                    }
                    prop_assert!(invariant_holds(&slot));
                }
            }
        }
    }
}
