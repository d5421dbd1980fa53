//! Extension traits

mod depot;
mod prices;
mod result;
mod timestamps;

pub(crate) use depot::DepotExt as _;
pub(crate) use prices::PriceExt as _;
pub(crate) use result::ResultExt as _;
pub(crate) use timestamps::TimestampExt as _;
