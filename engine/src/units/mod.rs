//! Playable unit types.

mod twin_via_platelet;

pub use twin_via_platelet::TwinViaPlatelet;
