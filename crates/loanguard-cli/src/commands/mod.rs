pub mod advise;
pub mod simulate;
