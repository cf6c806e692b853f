use anyhow::Context;
use log::{debug, info, warn};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use super::event::{PositionAmounts, PositionEvent};
use crate::config::PositionSettings;
use crate::math::{get_amounts, get_sqrt_ratio_at_tick, MathError, RangeStatus};
use crate::utils::{parse_u256, sqrt_price_x96_to_price, u256_to_f64, PoolKey, PoolKeyError};

/// Why a single position event could not be handled.
#[derive(Debug, Error)]
pub enum PositionError {
    #[error("invalid liquidity {0:?}")]
    InvalidLiquidity(String),
    #[error(transparent)]
    Math(#[from] MathError),
    #[error(transparent)]
    PoolKey(#[from] PoolKeyError),
}

/// Counts from one pass over an event stream.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub handled: u64,
    pub skipped: u64,
}

/// Turns position events into token amounts.
///
/// Stateless apart from its settings; a single handler can be shared across
/// tasks.
#[derive(Debug, Clone)]
pub struct PositionHandler {
    settings: PositionSettings,
}

impl PositionHandler {
    pub fn new(settings: PositionSettings) -> Self {
        Self { settings }
    }

    /// Compute the amounts for one event.
    pub fn handle(&self, event: &PositionEvent) -> Result<PositionAmounts, PositionError> {
        let liquidity = parse_u256(&event.liquidity)
            .ok_or_else(|| PositionError::InvalidLiquidity(event.liquidity.clone()))?;

        let (amount0, amount1) =
            get_amounts(event.tick_lower, event.tick_upper, event.current_tick, liquidity)?;

        let pool_id = event.pool_key.as_ref().map(PoolKey::id).transpose()?;

        let token0_decimals = event
            .token0_decimals
            .unwrap_or(self.settings.default_token0_decimals);
        let token1_decimals = event
            .token1_decimals
            .unwrap_or(self.settings.default_token1_decimals);

        let price = if self.settings.include_price {
            let sqrt_price_x96 = get_sqrt_ratio_at_tick(event.current_tick)?;
            sqrt_price_x96_to_price(sqrt_price_x96, token0_decimals, token1_decimals)
        } else {
            None
        };

        Ok(PositionAmounts {
            token_id: event.token_id.clone(),
            pool_id,
            tick_lower: event.tick_lower,
            tick_upper: event.tick_upper,
            current_tick: event.current_tick,
            status: RangeStatus::classify(event.tick_lower, event.tick_upper, event.current_tick),
            amount0: amount0.to_string(),
            amount1: amount1.to_string(),
            amount0_adjusted: u256_to_f64(amount0, token0_decimals),
            amount1_adjusted: u256_to_f64(amount1, token1_decimals),
            price,
        })
    }

    /// Handle a stream of JSON-line events, writing one JSON line per result.
    ///
    /// A malformed line or an event that fails to compute is logged and
    /// skipped; only I/O failures abort the run. Returns once the reader is
    /// exhausted or `cancellation_token` fires.
    pub async fn run<R, W>(
        &self,
        reader: R,
        mut writer: W,
        cancellation_token: CancellationToken,
    ) -> anyhow::Result<RunSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut summary = RunSummary::default();
        let mut line_number: u64 = 0;

        loop {
            let line = tokio::select! {
                biased;
                _ = cancellation_token.cancelled() => {
                    info!("Position handler cancelled after {} lines", line_number);
                    break;
                }
                line = lines.next_line() => line.context("Failed to read position event")?,
            };

            let Some(line) = line else {
                break;
            };
            line_number += 1;

            if line.trim().is_empty() {
                continue;
            }

            let event: PositionEvent = match serde_json::from_str(&line) {
                Ok(event) => event,
                Err(e) => {
                    warn!("Line {}: malformed position event: {}", line_number, e);
                    summary.skipped += 1;
                    continue;
                }
            };

            match self.handle(&event) {
                Ok(amounts) => {
                    debug!(
                        "Position {}: amount0={} amount1={} ({:?})",
                        amounts.token_id, amounts.amount0, amounts.amount1, amounts.status
                    );

                    let mut out = serde_json::to_vec(&amounts)
                        .context("Failed to serialize position amounts")?;
                    out.push(b'\n');
                    writer
                        .write_all(&out)
                        .await
                        .context("Failed to write position amounts")?;

                    summary.handled += 1;
                }
                Err(e) => {
                    warn!(
                        "Line {}: skipping position {}: {}",
                        line_number, event.token_id, e
                    );
                    summary.skipped += 1;
                }
            }
        }

        writer.flush().await.context("Failed to flush output")?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn handler() -> PositionHandler {
        PositionHandler::new(PositionSettings::default())
    }

    fn event(tick_lower: i32, tick_upper: i32, current_tick: i32, liquidity: &str) -> PositionEvent {
        PositionEvent {
            token_id: "7".to_string(),
            pool_key: None,
            tick_lower,
            tick_upper,
            current_tick,
            liquidity: liquidity.to_string(),
            token0_decimals: None,
            token1_decimals: None,
        }
    }

    #[test]
    fn test_handle_below_range() {
        let amounts = handler().handle(&event(-10, 10, -20, "1000000")).unwrap();
        assert_eq!(amounts.amount0, "999");
        assert_eq!(amounts.amount1, "0");
        assert_eq!(amounts.status, RangeStatus::Below);
        assert_eq!(amounts.amount1_adjusted, Some(0.0));
        assert!(amounts.pool_id.is_none());
    }

    #[test]
    fn test_handle_in_range_uses_event_decimals() {
        let mut e = event(-10, 10, 0, "0xf4240");
        e.token0_decimals = Some(3);
        e.token1_decimals = Some(3);

        let amounts = handler().handle(&e).unwrap();
        assert_eq!(amounts.amount0, "499");
        assert_eq!(amounts.amount1, "499");
        assert_eq!(amounts.amount0_adjusted, Some(0.499));
        assert_eq!(amounts.status, RangeStatus::InRange);
        assert_eq!(amounts.price, Some(1.0));
    }

    #[test]
    fn test_handle_without_price() {
        let handler = PositionHandler::new(PositionSettings {
            include_price: false,
            ..PositionSettings::default()
        });
        let amounts = handler.handle(&event(-10, 10, 20, "1000000")).unwrap();
        assert_eq!(amounts.amount1, "999");
        assert!(amounts.price.is_none());
    }

    #[test]
    fn test_handle_computes_pool_id() {
        let mut e = event(-60, 60, 0, "1");
        e.pool_key = Some(PoolKey {
            currency0: "0x0000000000000000000000000000000000000000".to_string(),
            currency1: "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
            fee: 3000,
            tick_spacing: 60,
            hooks: "0x0000000000000000000000000000000000000000".to_string(),
        });
        let expected = e.pool_key.as_ref().unwrap().id().unwrap();

        let amounts = handler().handle(&e).unwrap();
        assert_eq!(amounts.pool_id, Some(expected));
    }

    #[test]
    fn test_handle_errors() {
        assert!(matches!(
            handler().handle(&event(-10, 10, 0, "lots")),
            Err(PositionError::InvalidLiquidity(_))
        ));
        assert!(matches!(
            handler().handle(&event(-10, 900_000, 0, "1")),
            Err(PositionError::Math(MathError::InvalidTick(900_000)))
        ));
        assert!(matches!(
            handler().handle(&event(10, -10, 0, "1")),
            Err(PositionError::Math(MathError::InvalidRange { .. }))
        ));
    }

    #[tokio::test]
    async fn test_run_skips_bad_events() {
        let input = concat!(
            r#"{"token_id":"1","tick_lower":-10,"tick_upper":10,"current_tick":-20,"liquidity":"1000000"}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"token_id":"2","tick_lower":-10,"tick_upper":10,"current_tick":0,"liquidity":"-5"}"#,
            "\n",
            r#"{"token_id":"3","tick_lower":-10,"tick_upper":10,"current_tick":20,"liquidity":"1000000"}"#,
            "\n",
        );
        let mut output = Vec::new();

        let summary = handler()
            .run(input.as_bytes(), &mut output, CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(summary, RunSummary { handled: 2, skipped: 2 });

        let results: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0]["token_id"], "1");
        assert_eq!(results[0]["amount0"], "999");
        assert_eq!(results[0]["status"], "below");
        assert_eq!(results[1]["token_id"], "3");
        assert_eq!(results[1]["amount1"], "999");
        assert_eq!(results[1]["status"], "above");
    }

    #[tokio::test]
    async fn test_run_stops_when_cancelled() {
        let input = r#"{"token_id":"1","tick_lower":-10,"tick_upper":10,"current_tick":0,"liquidity":"1"}"#;
        let token = CancellationToken::new();
        token.cancel();

        let mut output = Vec::new();
        let summary = handler().run(input.as_bytes(), &mut output, token).await.unwrap();

        assert_eq!(summary, RunSummary::default());
        assert!(output.is_empty());
    }
}
