//! Unit tests for response normalization

use chrono::NaiveDate;
use marketpulse::services::error::GatewayError;
use marketpulse::services::marketpulse::responses::{
    DailyResponse, SummaryResponse, TimeSeriesResponse, TransactionsResponse,
};
use serde_json::json;

#[test]
fn flat_summary_computes_price_change() {
    let response: SummaryResponse = serde_json::from_value(json!({
        "totalTransactions": 120,
        "totalMarketValue": 250000000.0,
        "totalAreaSold": 12000.0,
        "averagePropertySize": 100.0,
        "averagePricePerExtent": 22000.0,
        "comparisons": { "previousPeriod": { "averagePricePerExtent": 20000.0 } }
    }))
    .unwrap();

    let summary = response.normalize().unwrap();
    assert_eq!(summary.total_transactions, 120);
    assert_eq!(summary.total_value, 250_000_000.0);
    let change = summary.price_change.unwrap();
    assert!((change - 10.0).abs() < 1e-9);
}

#[test]
fn flat_summary_without_previous_period_has_no_change() {
    let response: SummaryResponse =
        serde_json::from_value(json!({ "totalTransactions": 0 })).unwrap();
    let summary = response.normalize().unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.price_change, None);
}

#[test]
fn envelope_summary_is_accepted() {
    let response: SummaryResponse = serde_json::from_value(json!({
        "success": true,
        "data": {
            "summary": {
                "totalTransactions": 15,
                "totalValue": 90000000.0,
                "avgPrice": 6000000.0,
                "avgPricePerSqft": 5400.0,
                "priceChange": -2.5
            },
            "trendData": []
        }
    }))
    .unwrap();

    let summary = response.normalize().unwrap();
    assert_eq!(summary.total_transactions, 15);
    assert_eq!(summary.avg_price_per_unit, 5400.0);
    assert_eq!(summary.avg_price_per_transaction, Some(6_000_000.0));
    assert_eq!(summary.price_change, Some(-2.5));
}

#[test]
fn unsuccessful_envelope_is_api_error() {
    let response: SummaryResponse = serde_json::from_value(json!({
        "success": false,
        "error": "upstream unavailable"
    }))
    .unwrap();

    assert_eq!(
        response.normalize(),
        Err(GatewayError::Api("upstream unavailable".to_string()))
    );
}

#[test]
fn bare_envelope_fields_default_to_none() {
    let failed: TimeSeriesResponse = serde_json::from_value(json!({ "success": false })).unwrap();
    assert!(matches!(
        failed.normalize(),
        Err(GatewayError::Api(message)) if message == "request was not successful"
    ));

    let empty: SummaryResponse = serde_json::from_value(json!({ "success": true })).unwrap();
    assert!(matches!(empty.normalize(), Err(GatewayError::Decode(_))));
}

#[test]
fn unrelated_shape_fails_to_decode() {
    let result = serde_json::from_value::<SummaryResponse>(json!({ "rows": [] }));
    assert!(result.is_err());
}

#[test]
fn time_series_is_sorted_and_parsed() {
    let response: TimeSeriesResponse = serde_json::from_value(json!({
        "timeseries_data": [
            { "date": "22-01-2025", "sumTop10ConsiderationValue": 200.0 },
            { "date": "21-01-2025", "sumTop10ConsiderationValue": 100.0 }
        ]
    }))
    .unwrap();

    let points = response.normalize().unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].date, NaiveDate::from_ymd_opt(2025, 1, 21).unwrap());
    assert_eq!(points[1].value, 200.0);
}

#[test]
fn time_series_with_bad_date_is_malformed() {
    let response: TimeSeriesResponse = serde_json::from_value(json!({
        "timeseries_data": [{ "date": "yesterday", "sumTop10ConsiderationValue": 1.0 }]
    }))
    .unwrap();

    assert!(matches!(response.normalize(), Err(GatewayError::Decode(_))));
}

#[test]
fn detailed_transactions_fill_missing_fields() {
    let response: TransactionsResponse = serde_json::from_value(json!({
        "top_documents": [
            {
                "_id": "doc-1",
                "sroName": "GOLCONDA",
                "considerationValue": 52000000.0,
                "pricePerExtent": 65000.0,
                "extent": 800.0,
                "extentUnit": "Sq.Yds",
                "village": "Manikonda",
                "dateOfRegistration": "18-01-2025"
            },
            { "considerationValue": 1000.0 }
        ]
    }))
    .unwrap();

    let txs = response.normalize().unwrap();
    assert_eq!(txs[0].unit_of_extent, "Sq.Yds");
    assert_eq!(txs[0].registered_on, NaiveDate::from_ymd_opt(2025, 1, 18));
    assert_eq!(txs[1].id, "transaction-1");
    assert_eq!(txs[1].region, "N/A");
    assert_eq!(txs[1].registered_on, None);
}

#[test]
fn recent_transactions_envelope_maps_to_same_shape() {
    let response: TransactionsResponse = serde_json::from_value(json!({
        "success": true,
        "data": [{
            "id": "r1",
            "region": "Charminar",
            "price": 4500000.0,
            "pricePerSqft": 3000.0,
            "area": 1500.0,
            "type": "Residential",
            "timestamp": "2025-01-27T10:00:00Z"
        }]
    }))
    .unwrap();

    let txs = response.normalize().unwrap();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].village, "Residential");
    assert_eq!(txs[0].registered_on, NaiveDate::from_ymd_opt(2025, 1, 27));
}

#[test]
fn daily_error_body_is_api_error() {
    let response: DailyResponse =
        serde_json::from_value(json!({ "error": "no data for today" })).unwrap();
    assert_eq!(
        response.normalize(),
        Err(GatewayError::Api("no data for today".to_string()))
    );
}

#[test]
fn daily_report_normalizes() {
    let response: DailyResponse = serde_json::from_value(json!({
        "costliestTransaction": { "region": "Gandipet", "pricePerSqYd": 90000.0, "totalPrice": 180000000.0 },
        "mostAffordableTransaction": { "region": "Shadnagar", "pricePerSqYd": 1200.0, "totalPrice": 600000.0 },
        "mostActiveRegion": { "region": "Serilingampalli", "transactionCount": 48 },
        "totalTransactionsToday": 310,
        "largestAreaSold": { "region": "Chevella", "areaSqYd": 24200.0 },
        "marketRecord": { "type": "price", "value": "₹9.0Cr", "description": "Highest single sale this month" }
    }))
    .unwrap();

    let daily = response.normalize().unwrap();
    assert_eq!(daily.costliest.region, "Gandipet");
    assert_eq!(daily.most_active.transaction_count, 48);
    assert_eq!(daily.largest_area.area, 24_200.0);
    assert_eq!(daily.market_record.map(|r| r.kind), Some("price".to_string()));
}
