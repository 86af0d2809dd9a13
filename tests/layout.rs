use indicator_chart_wasm::domain::chart::{LayoutConfig, PanelKey, Percent, plan_layout, plan_panels};
use indicator_chart_wasm::domain::market_data::{IndicatorKind, IndicatorSelection};
use insta::assert_json_snapshot;
use quickcheck_macros::quickcheck;
use strum::IntoEnumIterator;

fn selection_from_bits(bits: u16) -> IndicatorSelection {
    IndicatorKind::iter().enumerate().filter(|(i, _)| bits & (1 << i) != 0).map(|(_, kind)| kind).collect()
}

fn selection(keys: &[&str]) -> IndicatorSelection {
    IndicatorSelection::parse_keys(keys).unwrap()
}

#[quickcheck]
fn oscillator_panel_exists_iff_an_oscillator_is_selected(bits: u16) -> bool {
    let selection = selection_from_bits(bits);
    let panels = plan_panels(&selection);
    let has_osc = panels.iter().any(|p| p.key == PanelKey::Osc);
    has_osc == selection.iter().any(|k| k.is_oscillator())
}

#[quickcheck]
fn adding_an_oscillator_adds_at_most_one_panel(bits: u16, pick: u8) -> bool {
    let before = selection_from_bits(bits);
    let oscillators: Vec<IndicatorKind> = IndicatorKind::oscillators().collect();
    let mut after = before.clone();
    after.insert(oscillators[usize::from(pick) % oscillators.len()]);

    let (n_before, n_after) = (plan_panels(&before).len(), plan_panels(&after).len());
    n_after >= n_before && n_after - n_before <= 1 && plan_panels(&after).iter().any(|p| p.key == PanelKey::Osc)
}

#[quickcheck]
fn axis_indices_follow_panel_order(bits: u16) -> bool {
    let panels = plan_panels(&selection_from_bits(bits));
    panels.first().map(|p| p.key) == Some(PanelKey::Main)
        && panels.iter().enumerate().all(|(i, p)| p.axis_index == i)
        && panels.windows(2).all(|w| w[0].key < w[1].key)
}

#[test]
fn main_panel_weight_depends_on_panel_count() {
    let alone = plan_panels(&selection(&["ma"]));
    assert_eq!(alone.len(), 1);
    assert_eq!(alone[0].weight, 1);

    let with_volume = plan_panels(&selection(&["ma", "volume"]));
    assert_eq!(with_volume.iter().map(|p| (p.key, p.weight)).collect::<Vec<_>>(), vec![
        (PanelKey::Main, 2),
        (PanelKey::Volume, 1)
    ]);

    let with_osc = plan_panels(&selection(&["rsi", "macd", "kdj"]));
    assert_eq!(with_osc.iter().map(|p| (p.key, p.weight)).collect::<Vec<_>>(), vec![
        (PanelKey::Main, 2),
        (PanelKey::Osc, 1)
    ]);
}

#[test]
fn placements_stay_inside_the_margins() {
    let config = LayoutConfig::default();
    for bits in 0..(1u16 << 12) {
        let plan = plan_layout(&selection_from_bits(bits), 50, &config).unwrap();
        let last = plan.placements().last().unwrap();
        let bottom = last.top.value() + last.height.value();
        assert!((bottom - (100.0 - config.bottom)).abs() < 0.02, "bits {:#x}: bottom at {}", bits, bottom);
        assert_eq!(plan.placements().iter().filter(|p| p.show_x_labels).count(), 1);
    }
}

#[test]
fn nothing_to_lay_out_without_bars() {
    assert!(plan_layout(&selection(&["ma", "volume", "rsi"]), 0, &LayoutConfig::default()).is_none());
}

#[test]
fn custom_margins_shift_the_band() {
    let config = LayoutConfig { top: 10.0, bottom: 10.0, gap: 0.0, ..LayoutConfig::default() };
    let plan = plan_layout(&selection(&["volume"]), 5, &config).unwrap();
    let heights: Vec<Percent> = plan.placements().iter().map(|p| p.height).collect();
    assert_eq!(heights, vec![Percent::new(53.33), Percent::new(26.67)]);
}

#[test]
fn three_panel_layout_snapshot() {
    let plan = plan_layout(&selection(&["ma", "volume", "rsi"]), 120, &LayoutConfig::default()).unwrap();
    assert_json_snapshot!(plan.placements(), @r###"
    [
      {
        "panel": {
          "key": "main",
          "weight": 2,
          "axisIndex": 0
        },
        "top": "6%",
        "height": "37%",
        "showXLabels": false
      },
      {
        "panel": {
          "key": "volume",
          "weight": 1,
          "axisIndex": 1
        },
        "top": "47%",
        "height": "18.5%",
        "showXLabels": false
      },
      {
        "panel": {
          "key": "osc",
          "weight": 1,
          "axisIndex": 2
        },
        "top": "69.5%",
        "height": "18.5%",
        "showXLabels": true
      }
    ]
    "###);
}
