//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod data;
pub(crate) mod filter;
pub(crate) mod routes;

pub(crate) use check::CheckArgs;
pub(crate) use data::DataArgs;
pub(crate) use filter::FilterArgs;
pub(crate) use routes::RoutesArgs;
