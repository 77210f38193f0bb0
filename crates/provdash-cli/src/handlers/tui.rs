use crate::context::ExecutionContext;
use crate::presentation::TuiRenderer;
use anyhow::Result;
use provdash_runtime::ChartStyle;

pub async fn handle(ctx: &ExecutionContext, chart: Option<ChartStyle>) -> Result<()> {
    let (store, executor, events) = ctx.session()?.into_parts();
    let chart_style = chart.unwrap_or(ctx.config.ui.chart_style);

    TuiRenderer::new(store, executor, events, chart_style, ctx.config.ui.trend_len)
        .run()
        .await
}
