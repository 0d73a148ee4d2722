// Property tests live in the integration test crate
use proptest as _;

mod layout;
mod model;
mod pagination;
mod support;
