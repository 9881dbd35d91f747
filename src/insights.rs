use crate::models::{AlertNotice, ConsumptionReading, InsightsPayload, Placement, TooltipBinding};

pub const ELECTRICITY_ALERT_UNITS: f64 = 100.0;
pub const WATER_ALERT_UNITS: f64 = 200.0;
pub const AVERAGE_ELECTRICITY_UNITS: f64 = 100.0;
pub const PRICE_PER_UNIT: f64 = 0.15;
pub const CO2_KG_PER_TRANSIT_MILE: f64 = 0.14;

pub const ELECTRICITY_TARGET: &str = "electricity-chart";
pub const TRANSPORT_TARGET: &str = "transport-stats";

/// Insights for the most recent reading. No reading, no insights.
pub fn build_insights(latest: Option<&ConsumptionReading>) -> InsightsPayload {
    let mut insights = InsightsPayload::default();
    let Some(reading) = latest else {
        return insights;
    };

    if reading.electricity > ELECTRICITY_ALERT_UNITS {
        insights.alerts.push(warning(
            format!(
                "Your electricity consumption ({:?} units) is above average.",
                reading.electricity
            ),
            "Consider using energy-efficient appliances and turning off unused devices.",
        ));
    }

    if reading.water > WATER_ALERT_UNITS {
        insights.alerts.push(warning(
            format!("Your water consumption ({:?} units) is high.", reading.water),
            "Check for leaks and consider installing water-saving fixtures.",
        ));
    }

    if reading.electricity > 0.0 {
        let savings = (reading.electricity - AVERAGE_ELECTRICITY_UNITS) * PRICE_PER_UNIT;
        if savings > 0.0 {
            insights.tooltips.push(TooltipBinding {
                element_id: ELECTRICITY_TARGET.to_string(),
                message: format!(
                    "Potential savings of ${savings:.2} by reducing consumption to average levels."
                ),
                position: Placement::Top,
            });
        }
    }

    if reading.public_transport > 0.0 {
        let co2_saved = reading.public_transport * CO2_KG_PER_TRANSIT_MILE;
        insights.tooltips.push(TooltipBinding {
            element_id: TRANSPORT_TARGET.to_string(),
            message: format!("You've saved {co2_saved:.1}kg of CO2 by using public transport!"),
            position: Placement::Right,
        });
    }

    insights
}

fn warning(message: String, tooltip: &str) -> AlertNotice {
    AlertNotice {
        message,
        tooltip: tooltip.to_string(),
        kind: Some("warning".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(electricity: f64, water: f64, public_transport: f64) -> ConsumptionReading {
        ConsumptionReading {
            timestamp: "2026-01-05T08:00:00+00:00".into(),
            electricity,
            gas: 10.0,
            water,
            car_miles: 20.0,
            public_transport,
            household_size: Some(2),
        }
    }

    #[test]
    fn no_reading_means_empty_insights() {
        assert_eq!(build_insights(None), InsightsPayload::default());
    }

    #[test]
    fn quiet_month_has_no_alerts() {
        let insights = build_insights(Some(&reading(80.0, 150.0, 0.0)));
        assert!(insights.alerts.is_empty());
        assert!(insights.tooltips.is_empty());
        assert!(insights.recommendations.is_empty());
    }

    #[test]
    fn heavy_usage_raises_both_alerts_in_order() {
        let insights = build_insights(Some(&reading(150.0, 250.0, 0.0)));
        assert_eq!(insights.alerts.len(), 2);
        assert_eq!(
            insights.alerts[0].message,
            "Your electricity consumption (150.0 units) is above average."
        );
        assert_eq!(insights.alerts[1].message, "Your water consumption (250.0 units) is high.");
        assert!(insights.alerts.iter().all(|a| a.kind.as_deref() == Some("warning")));
    }

    #[test]
    fn savings_tooltip_targets_electricity_chart() {
        let insights = build_insights(Some(&reading(150.0, 0.0, 0.0)));
        assert_eq!(insights.tooltips.len(), 1);
        let tip = &insights.tooltips[0];
        assert_eq!(tip.element_id, ELECTRICITY_TARGET);
        assert_eq!(tip.position, Placement::Top);
        assert_eq!(
            tip.message,
            "Potential savings of $7.50 by reducing consumption to average levels."
        );
    }

    #[test]
    fn transit_tooltip_reports_co2() {
        let insights = build_insights(Some(&reading(50.0, 0.0, 25.0)));
        assert_eq!(insights.tooltips.len(), 1);
        let tip = &insights.tooltips[0];
        assert_eq!(tip.element_id, TRANSPORT_TARGET);
        assert_eq!(tip.position, Placement::Right);
        assert_eq!(tip.message, "You've saved 3.5kg of CO2 by using public transport!");
    }
}
