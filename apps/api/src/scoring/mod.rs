//! Job-fit scoring. Leaf classifiers each look at one dimension of a posting;
//! `engine` runs them, `aggregate` weighs them and `reasoning` explains the result.
pub mod aggregate;
pub mod config;
pub mod eligibility;
pub mod engine;
pub mod handlers;
pub mod industry;
pub mod location;
pub mod profile_index;
pub mod reasoning;
pub mod result;
pub mod role;
pub mod seniority;
pub mod technical;
pub mod visa;
pub mod years;
