use std::time::Duration;

use tasknote_core::clock::ClockTicker;

use crate::error::CliError;

/// Print the clock on every tick until `ticks` updates were shown or Ctrl-C
pub async fn run_clock(period: Duration, ticks: Option<u32>) -> Result<(), CliError> {
    let ticker = ClockTicker::spawn(period);
    let mut receiver = ticker.subscribe();
    let mut shown = 0u32;

    loop {
        let current = receiver.borrow_and_update().clone();
        println!("{current}");
        shown = shown.saturating_add(1);
        if ticks.is_some_and(|limit| shown >= limit) {
            break;
        }

        tokio::select! {
            changed = receiver.changed() => {
                if changed.is_err() {
                    break;
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                break;
            }
        }
    }

    Ok(())
}
