//! Campaign Offers

mod handlers;

pub(crate) use handlers::*;
