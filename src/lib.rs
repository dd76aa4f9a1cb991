// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
pub mod Utils;
pub mod global;
pub mod numerical;
pub mod revolution;
pub mod symbolic;

pub use numerical::disk_method::{compute_volume, compute_volume_with};
pub use revolution::{RevolutionError, calculate, run_task};
pub use symbolic::symbolic_lambdify::parse;
