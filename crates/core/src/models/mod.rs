#![allow(missing_docs)]

//! Animal and staff records.

mod animal;
mod staff;

pub use animal::{Animal, Species};
pub use staff::{Staff, Veterinarian, ZooKeeper};
