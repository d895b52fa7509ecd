//! Render cycle tests against in-memory sources.

mod common;

use common::date;
use crypto_dashboard::chart::ChartKind;
use crypto_dashboard::dashboard::{daily_title, monthly_title, no_data_message};
use crypto_dashboard::models::{month_label, month_number};
use crypto_dashboard::{
    Crypto, Dashboard, DashboardError, MissingFieldPolicy, Normalizer, PlotlyRenderer,
    RawPricePoint, RenderOutcome, Selection, StaticSource,
};

fn dashboard() -> Dashboard<StaticSource> {
    let source = StaticSource::new()
        .with_series("BTC-USD", common::multi_year_raw())
        .with_series(
            "TRX-USD",
            vec![
                RawPricePoint::ohlc(date(2019, 4, 1), 1.0, 1.0, 1.0, 1.0),
                RawPricePoint::ohlc(date(2019, 4, 2), 1.0, 1.0, 1.0, 1.0),
            ],
        );
    Dashboard::builder(source).build()
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

#[test]
fn selection_defaults() {
    let selection = Selection::new("btc-usd").unwrap();
    assert_eq!(selection.crypto.name, "Bitcoin");
    assert_eq!(selection.start, date(2021, 1, 1));
    assert_eq!(selection.end, date(2024, 12, 31));
    assert_eq!(selection.month, 1);
}

#[test]
fn selection_rejects_unknown_symbol() {
    assert!(matches!(
        Selection::new("FOO-USD"),
        Err(DashboardError::InvalidInput(_))
    ));
}

#[test]
fn selection_month_from_label() {
    let selection = Selection::new("ETH-USD").unwrap().month_label("Sep").unwrap();
    assert_eq!(selection.month, 9);
    assert!(Selection::new("ETH-USD").unwrap().month_label("Sept").is_err());
}

#[test]
fn month_labels_round_trip() {
    for m in 1..=12 {
        assert_eq!(month_number(month_label(m).unwrap()).unwrap(), m);
    }
    assert!(month_label(0).is_err());
    assert!(month_label(13).is_err());
}

#[test]
fn catalog_has_ten_pairs() {
    let catalog = Crypto::catalog();
    assert_eq!(catalog.len(), 10);
    assert_eq!(catalog[0].symbol, "BTC-USD");
    assert_eq!(catalog[9].name, "Tron");
}

// ---------------------------------------------------------------------------
// render
// ---------------------------------------------------------------------------

#[test]
fn render_draws_both_charts() {
    let selection = Selection::new("BTC-USD").unwrap().month(2);
    let mut renderer = PlotlyRenderer::new();

    let outcome = dashboard().render(&selection, &mut renderer).unwrap();

    // The default end date is exclusive, so 2024-12-28 is still in range.
    assert_eq!(
        outcome,
        RenderOutcome::Rendered {
            records: 144,
            daily_rows: 12,
            monthly_rows: 48,
        }
    );
    assert!(renderer.warnings().is_empty());

    let daily = renderer.chart(ChartKind::DailyFluctuation).unwrap();
    assert_eq!(daily.chart.title, "Bitcoin Daily Fluctuation for Feb (2021-2024)");
    assert_eq!(daily.month_label.as_deref(), Some("Feb"));
    assert_eq!(daily.chart.series.len(), 4);

    let monthly = renderer.chart(ChartKind::MonthlyAverage).unwrap();
    assert_eq!(monthly.chart.title, "Bitcoin Monthly Average Price (2021-2024)");
    assert_eq!(monthly.figure["data"].as_array().unwrap().len(), 4);
}

#[test]
fn render_without_data_shows_warning() {
    let selection = Selection::new("ETH-USD").unwrap();
    let mut renderer = PlotlyRenderer::new();

    let outcome = dashboard().render(&selection, &mut renderer).unwrap();

    assert_eq!(outcome, RenderOutcome::NoData);
    assert!(renderer.charts().is_empty());
    assert_eq!(
        renderer.warnings(),
        &["No data available for Ethereum between the selected dates.".to_string()]
    );
}

#[test]
fn render_with_everything_filtered_draws_empty_charts() {
    let selection = Selection::new("TRX-USD")
        .unwrap()
        .dates(date(2019, 1, 1), date(2019, 12, 31));
    let mut renderer = PlotlyRenderer::new();

    let outcome = dashboard().render(&selection, &mut renderer).unwrap();

    assert_eq!(
        outcome,
        RenderOutcome::Rendered {
            records: 0,
            daily_rows: 0,
            monthly_rows: 0,
        }
    );
    assert!(renderer.warnings().is_empty());
    assert_eq!(renderer.charts().len(), 2);
    assert!(renderer.charts().iter().all(|c| c.chart.is_empty()));
}

#[test]
fn render_rejects_inverted_dates() {
    let selection = Selection::new("BTC-USD")
        .unwrap()
        .dates(date(2024, 1, 1), date(2023, 1, 1));
    let mut renderer = PlotlyRenderer::new();
    let err = dashboard().render(&selection, &mut renderer).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidInput(_)));
    assert!(renderer.charts().is_empty());
}

#[test]
fn render_rejects_out_of_range_month() {
    let selection = Selection::new("BTC-USD").unwrap().month(13);
    let mut renderer = PlotlyRenderer::new();
    assert!(matches!(
        dashboard().render(&selection, &mut renderer),
        Err(DashboardError::InvalidInput(_))
    ));
}

#[test]
fn load_distinguishes_no_data_from_filtered_out() {
    let d = dashboard();
    let eth = Crypto::from_symbol("ETH-USD").unwrap();
    let trx = Crypto::from_symbol("TRX-USD").unwrap();

    let err = d.load(&eth, date(2021, 1, 1), date(2022, 1, 1)).unwrap_err();
    assert!(matches!(err, DashboardError::NoDataAvailable { .. }));

    let records = d.load(&trx, date(2019, 1, 1), date(2020, 1, 1)).unwrap();
    assert!(records.is_empty());
}

#[test]
fn strict_normalizer_fails_the_render() {
    let source = StaticSource::new().with_series(
        "BTC-USD",
        vec![RawPricePoint::new(date(2022, 1, 1)).with("Open", 1.0)],
    );
    let d = Dashboard::builder(source)
        .normalizer(Normalizer::new().missing_field_policy(MissingFieldPolicy::Fail))
        .build();
    let mut renderer = PlotlyRenderer::new();
    let err = d
        .render(&Selection::new("BTC-USD").unwrap(), &mut renderer)
        .unwrap_err();
    assert!(matches!(err, DashboardError::MissingField { .. }));
}

#[test]
fn titles_and_messages() {
    assert_eq!(daily_title("Solana", "Mar"), "Solana Daily Fluctuation for Mar (2021-2024)");
    assert_eq!(monthly_title("Tether"), "Tether Monthly Average Price (2021-2024)");
    assert_eq!(
        no_data_message("XOR"),
        "No data available for XOR between the selected dates."
    );
}

#[cfg(feature = "async")]
#[tokio::test]
async fn async_dashboard_renders_on_blocking_pool() {
    use crypto_dashboard::AsyncDashboard;

    let d = AsyncDashboard::new(dashboard());
    let (outcome, renderer) = d
        .render(Selection::new("BTC-USD").unwrap().month(12))
        .await
        .unwrap();
    assert!(matches!(outcome, RenderOutcome::Rendered { .. }));
    assert_eq!(renderer.charts().len(), 2);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn async_dashboard_reports_panicked_task() {
    use crypto_dashboard::{AsyncDashboard, Result};

    let d = AsyncDashboard::new(dashboard());
    let err = d
        .run(|_| -> Result<()> { panic!("render blew up") })
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Task(_)));

    // The panic happened while the lock was held.
    let err = d
        .render(Selection::new("BTC-USD").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Task(ref msg) if msg.contains("poisoned")));
}
