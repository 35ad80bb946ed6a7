pub mod canonicalize;
pub mod detect;
pub mod fingerprint;
pub mod normalize;
