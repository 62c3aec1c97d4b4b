//! CLI library components for the shipment tracking ETL.

pub mod logging;
pub mod pipeline;
