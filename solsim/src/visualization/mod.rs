#[cfg(feature = "viewer")]
pub mod solsim_vis2d;
