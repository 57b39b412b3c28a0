pub mod aggregate;
pub mod orb;
pub mod provider;
