//! Player instruction values, positions and roles

pub mod instructions;
pub mod roles;

pub use instructions::{
    DefensiveWork, Depth, DribblingFrequency, Mentality, PassingStyle, PressingIntensity,
    ShootingTendency, TacklingStyle, Width,
};
pub use roles::{PlayerRole, Position, RoleTemplate, TemplateEntry};
