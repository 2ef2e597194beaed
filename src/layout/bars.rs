use crate::error::{ChartError, Result};
use crate::ir::{BarStyle, Record};
use crate::scale::{BandScale, ValueScale};
use std::collections::HashSet;

use super::BarLayout;

/// Fails unless the records split into runs of `group_size` sharing a label,
/// with one run per category.
pub fn validate_grouping(records: &[Record], group_size: usize) -> Result<()> {
    if group_size == 0 {
        return Err(ChartError::InvalidScale(
            "group size must be at least 1".to_string(),
        ));
    }
    if records.len() % group_size != 0 {
        return Err(ChartError::InvalidRecordGrouping {
            len: records.len(),
            group_size,
        });
    }
    let mut seen: HashSet<&str> = HashSet::new();
    for (run_idx, run) in records.chunks(group_size).enumerate() {
        let expected = &run[0].label;
        if !seen.insert(expected.as_str()) {
            return Err(ChartError::RepeatedCategory {
                index: run_idx * group_size,
                label: expected.clone(),
            });
        }
        if let Some((offset, stray)) = run
            .iter()
            .enumerate()
            .find(|(_, record)| &record.label != expected)
        {
            return Err(ChartError::MixedGroupLabels {
                index: run_idx * group_size + offset,
                expected: expected.clone(),
                found: stray.label.clone(),
            });
        }
    }
    Ok(())
}

pub fn style_class(record: &Record, group_index: usize, style: &BarStyle) -> Result<String> {
    match style {
        BarStyle::Fixed { class } => Ok(format!("bar {class}")),
        BarStyle::Named => record
            .name
            .as_deref()
            .map(|name| format!("bar {name}"))
            .ok_or_else(|| ChartError::MissingSeriesName {
                label: record.label.clone(),
            }),
        BarStyle::Diverging { roles, .. } => {
            let role = roles
                .get(group_index)
                .ok_or(ChartError::InvalidGroupIndex {
                    index: group_index,
                    roles: roles.len(),
                })?;
            let sign = if record.value < 0.0 {
                "negative"
            } else {
                "positive"
            };
            Ok(format!("bar {sign} {role}"))
        }
    }
}

/// Places each record in its slot of its category's band. Bars start at the
/// zero baseline and extend up for positive values, down for negative ones.
pub fn layout_bars(
    records: &[Record],
    group_size: usize,
    style: &BarStyle,
    x: &BandScale,
    y: &ValueScale,
) -> Result<Vec<BarLayout>> {
    validate_grouping(records, group_size)?;
    let baseline = y.baseline();
    let slot_width = x.band_width() / group_size as f64;

    records
        .iter()
        .enumerate()
        .map(|(idx, record)| {
            let group_index = idx % group_size;
            let band = x.band(&record.label)?;
            Ok(BarLayout {
                label: record.label.clone(),
                value: record.value,
                group_index,
                x: band + group_index as f64 * slot_width,
                y: y.y(record.value.max(0.0)),
                width: slot_width,
                height: (y.y(record.value) - baseline).abs(),
                class: style_class(record, group_index, style)?,
            })
        })
        .collect()
}
