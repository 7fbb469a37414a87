//! Plain-language interpretation of classified indicator readings.
//!
//! Text is chosen by state alone; the value and auxiliary numbers are only
//! substituted into it, always at fixed precision, so the same inputs
//! render identical text.

use crate::indicators::cycle::{GoldenRatioState, PiCycleState, TwoYearMaState};
use crate::indicators::momentum::RsiState;
use crate::indicators::sentiment::FearGreedState;
use crate::indicators::valuation::{MayerState, RainbowBand};
use crate::models::indicators::{
    IndicatorResult, Interpretation, Reading, SignalState, UnavailableReason,
};
use std::collections::BTreeMap;

const PI_CYCLE_ABOUT: &str = "The Pi Cycle Top compares a fast moving average with twice a \
     slow one. An upward cross of the faster line has coincided with previous cycle peaks.";
const TWO_YEAR_ABOUT: &str = "The 2-Year MA Multiplier measures price against a long moving \
     average. Below the average has marked bear-market floors; the top band far above it has \
     marked euphoric peaks.";
const RSI_ABOUT: &str = "The Relative Strength Index compares the size of recent gains with \
     recent losses on a 0 to 100 scale.";
const RAINBOW_ABOUT: &str = "The Rainbow position splits the distance from a long baseline \
     average into nine bands running from fire sale to maximum bubble.";
const MAYER_ABOUT: &str = "The Mayer Multiple is price divided by a moving average of price.";
const GOLDEN_RATIO_ABOUT: &str = "The Golden Ratio Multiplier stacks Fibonacci multiples on \
     a long moving average. Each level price clears has historically brought the cycle closer \
     to its top.";
const FEAR_GREED_ABOUT: &str = "The Fear & Greed Index condenses market sentiment into a \
     score from 0 (extreme fear) to 100 (extreme greed).";

struct Text {
    headline: &'static str,
    status: String,
    history: &'static str,
    action: &'static str,
}

impl Text {
    fn into_interpretation(self, about: &str) -> Interpretation {
        Interpretation {
            headline: self.headline.to_string(),
            explanation: format!("{} {}", about, self.status),
            historical_note: self.history.to_string(),
            suggested_action: self.action.to_string(),
        }
    }
}

/// Interpretation for one classified reading.
pub fn interpret(state: SignalState, value: f64, auxiliary: &BTreeMap<String, f64>) -> Interpretation {
    let aux = |key: &str| auxiliary.get(key).copied();
    match state {
        SignalState::PiCycle(s) => {
            let lines = PiCycleLines {
                fast: average_name(aux("fast_window")),
                slow: average_name(aux("slow_window")),
                distance_pct: aux("distance_pct"),
                days_since_cross: aux("days_since_cross"),
            };
            pi_cycle(s, value, &lines).into_interpretation(PI_CYCLE_ABOUT)
        }
        SignalState::TwoYearMa(s) => {
            two_year_ma(s, value, &average_name(aux("window"))).into_interpretation(TWO_YEAR_ABOUT)
        }
        SignalState::Rsi(s) => rsi(s, value).into_interpretation(RSI_ABOUT),
        SignalState::Rainbow(s) => {
            rainbow(s, value, &average_name(aux("window"))).into_interpretation(RAINBOW_ABOUT)
        }
        SignalState::MayerMultiple(s) => mayer(
            s,
            value,
            &average_name(aux("window")),
            aux("historical_mean"),
        )
        .into_interpretation(MAYER_ABOUT),
        SignalState::GoldenRatio(s) => golden_ratio(s, value, &average_name(aux("window")))
            .into_interpretation(GOLDEN_RATIO_ABOUT),
        SignalState::FearGreed(s) => fear_greed(s, value).into_interpretation(FEAR_GREED_ABOUT),
    }
}

/// Interpretation for a result, including unavailable ones.
pub fn interpret_result(result: &IndicatorResult) -> Interpretation {
    match &result.reading {
        Reading::Available { value, state } => interpret(*state, *value, &result.auxiliary),
        Reading::Unavailable { reason } => unavailable(result.name, reason),
    }
}

/// "350-day average" for a known window, a generic name otherwise.
fn average_name(window: Option<f64>) -> String {
    match window {
        Some(days) => format!("{}-day average", days.round() as i64),
        None => "baseline average".to_string(),
    }
}

fn unavailable(name: &str, reason: &UnavailableReason) -> Interpretation {
    let action = match reason {
        UnavailableReason::InsufficientHistory(_) => {
            "Request a longer price history or rely on the shorter-window indicators."
        }
        UnavailableReason::MissingSentimentScore | UnavailableReason::InvalidSentimentScore { .. } => {
            "Retry once the sentiment feed returns a valid score."
        }
    };
    Interpretation {
        headline: format!("{} unavailable", name),
        explanation: format!("{} could not be computed: {}.", name, reason),
        historical_note: String::new(),
        suggested_action: action.to_string(),
    }
}

struct PiCycleLines {
    fast: String,
    slow: String,
    distance_pct: Option<f64>,
    days_since_cross: Option<f64>,
}

fn pi_cycle(state: PiCycleState, ratio: f64, lines: &PiCycleLines) -> Text {
    let distance = lines.distance_pct.unwrap_or((ratio - 1.0) * 100.0);
    let (fast, slow) = (&lines.fast, &lines.slow);
    match state {
        PiCycleState::ExtremeTop => Text {
            headline: "Pi Cycle crossed: top signal active",
            status: format!(
                "The {} crossed twice the {} {} days ago and now sits at {:.3} of it ({:+.1}%).",
                fast,
                slow,
                lines.days_since_cross.unwrap_or(0.0).round() as i64,
                ratio,
                distance
            ),
            history: "Crosses in 2013, 2017 and 2021 landed within days of the cycle high.",
            action: "Take profits in stages and tighten risk on remaining positions.",
        },
        PiCycleState::Warning => Text {
            headline: "Pi Cycle lines converging",
            status: format!(
                "The {} is at {:.3} of twice the {}, {:.1}% short of a cross.",
                fast,
                ratio,
                slow,
                distance.abs()
            ),
            history: "Gaps this narrow have usually closed within weeks during late bull phases.",
            action: "Prepare an exit plan and watch for the cross.",
        },
        PiCycleState::Safe => Text {
            headline: "No Pi Cycle top signal",
            status: format!(
                "The {} is at {:.3} of twice the {} ({:+.1}%).",
                fast, ratio, slow, distance
            ),
            history: "Most of every cycle is spent in this state.",
            action: "No action from this indicator; keep monitoring as the gap changes.",
        },
    }
}

fn two_year_ma(state: TwoYearMaState, multiplier: f64, average: &str) -> Text {
    let status = format!("Price is {:.2}x the {}.", multiplier, average);
    match state {
        TwoYearMaState::Bottom => Text {
            headline: "Below the long average: accumulation zone",
            status,
            history: "Time spent under the long average has been the cheapest part of past cycles.",
            action: "Accumulate gradually; bottoms can take months to form.",
        },
        TwoYearMaState::Neutral => Text {
            headline: "Modestly above the long average",
            status,
            history: "Early and mid bull markets usually trade in this range.",
            action: "Hold existing positions.",
        },
        TwoYearMaState::Bullish => Text {
            headline: "Well above the long average",
            status,
            history: "Strong trends have run on toward the top band before peaking.",
            action: "Hold, and start setting profit targets.",
        },
        TwoYearMaState::ExtremeTop => Text {
            headline: "Top band reached: historic top zone",
            status,
            history: "Past visits to the top band were followed by drawdowns of 70% or more.",
            action: "Take significant profits.",
        },
    }
}

fn rsi(state: RsiState, value: f64) -> Text {
    let status = format!("RSI reads {:.1}.", value);
    match state {
        RsiState::Oversold => Text {
            headline: "RSI oversold",
            status,
            history: "Oversold readings have often preceded relief bounces.",
            action: "Look for entries, confirming with longer-horizon indicators.",
        },
        RsiState::Neutral => Text {
            headline: "RSI neutral",
            status,
            history: "Momentum in this range says little about cycle position.",
            action: "No action from momentum alone.",
        },
        RsiState::Overbought => Text {
            headline: "RSI overbought",
            status,
            history: "Overbought readings have often preceded pullbacks or consolidation.",
            action: "Avoid chasing; consider trimming into strength.",
        },
    }
}

fn rainbow(band: RainbowBand, ratio: f64, average: &str) -> Text {
    let status = format!("Price sits at {:.2}x the {}.", ratio, average);
    let (headline, history, action) = match band {
        RainbowBand::FireSale => (
            "Rainbow: fire sale",
            "The lowest band has only been reached in capitulation phases.",
            "Accumulate aggressively if your risk tolerance allows.",
        ),
        RainbowBand::Buy => (
            "Rainbow: buy",
            "Deep discounts to the baseline have rewarded patient buyers.",
            "Accumulate.",
        ),
        RainbowBand::Accumulate => (
            "Rainbow: accumulate",
            "Price below the baseline has tended to revert upward over time.",
            "Keep accumulating steadily.",
        ),
        RainbowBand::StillCheap => (
            "Rainbow: still cheap",
            "Just under the baseline, value remains on the buyer's side.",
            "Continue regular purchases.",
        ),
        RainbowBand::Hold => (
            "Rainbow: hold",
            "Price near the baseline is fair value by this measure.",
            "Hold.",
        ),
        RainbowBand::IsThisABubble => (
            "Rainbow: is this a bubble?",
            "Moderate premiums are normal in healthy uptrends.",
            "Hold and define profit-taking levels.",
        ),
        RainbowBand::FomoIntensifies => (
            "Rainbow: FOMO intensifies",
            "Premiums this large appear in the second half of bull markets.",
            "Begin scaling out of positions.",
        ),
        RainbowBand::SellSeriously => (
            "Rainbow: sell, seriously",
            "Price has rarely stayed this far above the baseline for long.",
            "Take substantial profits.",
        ),
        RainbowBand::MaximumBubble => (
            "Rainbow: maximum bubble",
            "The top band has only been touched at cycle peaks.",
            "Exit most speculative exposure.",
        ),
    };
    Text {
        headline,
        status,
        history,
        action,
    }
}

fn mayer(state: MayerState, multiple: f64, average: &str, historical_mean: Option<f64>) -> Text {
    let status = match historical_mean {
        Some(mean) => format!(
            "The multiple over the {} is {:.2} against a long-run mean of {:.2}.",
            average, multiple, mean
        ),
        None => format!("The multiple over the {} is {:.2}.", average, multiple),
    };
    match state {
        MayerState::Undervalued => Text {
            headline: "Mayer Multiple: undervalued",
            status,
            history: "Buying in the undervalued zone has historically produced strong long-term returns.",
            action: "Accumulate.",
        },
        MayerState::Normal => Text {
            headline: "Mayer Multiple: normal range",
            status,
            history: "Most trading days fall inside the normal band.",
            action: "Hold.",
        },
        MayerState::Overvalued => Text {
            headline: "Mayer Multiple: overvalued",
            status,
            history: "Multiples in the overvalued zone have marked speculative excess near tops.",
            action: "Reduce exposure.",
        },
    }
}

fn golden_ratio(state: GoldenRatioState, ratio: f64, average: &str) -> Text {
    let status = format!("Price is {:.3}x the {}.", ratio, average);
    let (headline, history, action) = match state {
        GoldenRatioState::Safe => (
            "Golden Ratio: below the first Fibonacci level",
            "Price under the first level has left plenty of room before past tops.",
            "No action from this indicator.",
        ),
        GoldenRatioState::Warning => (
            "Golden Ratio: first level cleared",
            "The first level is commonly cleared early in a bull run.",
            "Hold and watch the next levels.",
        ),
        GoldenRatioState::ElevatedWarning => (
            "Golden Ratio: second level cleared",
            "Clearing the second level has signalled a maturing advance.",
            "Set profit targets.",
        ),
        GoldenRatioState::Top => (
            "Golden Ratio: third level cleared",
            "Recent cycle highs have stalled around this level.",
            "Start taking profits.",
        ),
        GoldenRatioState::MajorTop => (
            "Golden Ratio: fourth level cleared",
            "Earlier cycles peaked between the fourth level and the last.",
            "Take substantial profits.",
        ),
        GoldenRatioState::ExtremeTop => (
            "Golden Ratio: top level cleared",
            "Only the most euphoric peaks have reached this level.",
            "Exit most speculative exposure.",
        ),
    };
    Text {
        headline,
        status,
        history,
        action,
    }
}

fn fear_greed(state: FearGreedState, score: f64) -> Text {
    let status = format!("The current score is {:.0}.", score);
    let (headline, history, action) = match state {
        FearGreedState::ExtremeFear => (
            "Extreme fear",
            "Panic readings have often coincided with local bottoms.",
            "Consider buying while others are fearful.",
        ),
        FearGreedState::Fear => (
            "Fear",
            "Cautious sentiment tends to keep prices subdued.",
            "Accumulate selectively.",
        ),
        FearGreedState::Neutral => (
            "Neutral sentiment",
            "Balanced sentiment gives no contrarian edge.",
            "No action from sentiment alone.",
        ),
        FearGreedState::Greed => (
            "Greed",
            "Optimism builds as rallies extend.",
            "Stay disciplined with position sizes.",
        ),
        FearGreedState::ExtremeGreed => (
            "Extreme greed",
            "Euphoric readings have often preceded corrections.",
            "Consider trimming positions.",
        ),
    };
    Text {
        headline,
        status,
        history,
        action,
    }
}
