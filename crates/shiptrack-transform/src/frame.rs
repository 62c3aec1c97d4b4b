//! Flat table DataFrame construction.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};

use shiptrack_model::{FLAT_COLUMNS, FlatShipmentRecord};

use crate::datetime::format_local;

/// Build the flat shipment table.
///
/// Columns follow [`FLAT_COLUMNS`]; timestamps are rendered as local
/// `YYYY-MM-DD HH:MM:SS` text and absent location fields become nulls.
pub fn build_shipment_frame(records: &[FlatShipmentRecord]) -> PolarsResult<DataFrame> {
    let text = |f: fn(&FlatShipmentRecord) -> String| -> Vec<String> {
        records.iter().map(f).collect()
    };
    let optional = |f: fn(&FlatShipmentRecord) -> Option<String>| -> Vec<Option<String>> {
        records.iter().map(f).collect()
    };
    let integer = |f: fn(&FlatShipmentRecord) -> i64| -> Vec<i64> {
        records.iter().map(f).collect()
    };

    let [
        tracking_number,
        payment_type,
        pickup_datetime,
        delivery_datetime,
        days_taken,
        shipment_weight,
        pickup_pincode,
        pickup_city,
        pickup_state,
        drop_pincode,
        drop_city,
        drop_state,
        delivery_attempts,
    ] = FLAT_COLUMNS;

    let columns: Vec<Column> = vec![
        Series::new(tracking_number.into(), text(|r| r.tracking_number.clone())).into(),
        Series::new(payment_type.into(), text(|r| r.payment_type.to_string())).into(),
        Series::new(pickup_datetime.into(), text(|r| format_local(&r.pickup_datetime))).into(),
        Series::new(
            delivery_datetime.into(),
            text(|r| format_local(&r.delivery_datetime)),
        )
        .into(),
        Series::new(days_taken.into(), integer(|r| r.days_taken)).into(),
        Series::new(shipment_weight.into(), text(|r| r.shipment_weight.clone())).into(),
        Series::new(pickup_pincode.into(), optional(|r| r.pickup_pincode.clone())).into(),
        Series::new(pickup_city.into(), optional(|r| r.pickup_city.clone())).into(),
        Series::new(pickup_state.into(), optional(|r| r.pickup_state.clone())).into(),
        Series::new(drop_pincode.into(), optional(|r| r.drop_pincode.clone())).into(),
        Series::new(drop_city.into(), optional(|r| r.drop_city.clone())).into(),
        Series::new(drop_state.into(), optional(|r| r.drop_state.clone())).into(),
        Series::new(delivery_attempts.into(), integer(|r| r.delivery_attempts)).into(),
    ];
    DataFrame::new(columns)
}
