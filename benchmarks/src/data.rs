use featpipe::dataset::{Cell, Column, Series, Table};

/// Where gaps are placed in a synthetic series.
///
/// Every `period` samples a run of `gap` consecutive samples is missing,
/// starting at `offset` within the period.
#[derive(Debug, Clone, Copy)]
pub struct GapPattern {
    pub period: usize,
    pub gap: usize,
    pub offset: usize,
}

impl GapPattern {
    /// No missing samples.
    pub fn none() -> Self {
        Self {
            period: 1,
            gap: 0,
            offset: 0,
        }
    }

    /// Whether sample `i` falls inside a gap.
    pub fn is_missing(&self, i: usize) -> bool {
        if self.gap == 0 || self.period == 0 {
            return false;
        }
        let pos = i % self.period;
        pos >= self.offset && pos < self.offset + self.gap
    }
}

impl Default for GapPattern {
    fn default() -> Self {
        Self {
            period: 40,
            gap: 5,
            offset: 17,
        }
    }
}

/// A daily-cycle sensor reading with a slow trend, gapped per `pattern`.
///
/// # Example
///
/// ```
/// use featpipe_benchmarks::data::{gappy_series, GapPattern};
///
/// let series = gappy_series(100, GapPattern::default());
/// assert_eq!(series.len(), 100);
/// assert_eq!(series.n_missing(), 13);
/// ```
pub fn gappy_series(len: usize, pattern: GapPattern) -> Series {
    (0..len)
        .map(|i| {
            if pattern.is_missing(i) {
                None
            } else {
                let t = i as f64;
                Some(20.0 + 5.0 * (t * std::f64::consts::TAU / 24.0).sin() + 0.01 * t)
            }
        })
        .collect()
}

const SITES: [&str; 4] = ["north", "south", "east", "west"];
const SENSORS: [&str; 3] = ["thermo", "hygro", "baro"];

/// A table of `rows` readings: `site` (nominal), `reading` (numeric, every
/// seventh cell missing), `sensor` (nominal) and `battery` (numeric).
pub fn sensor_table(rows: usize) -> Table {
    let sites: Vec<&str> = (0..rows).map(|i| SITES[i % SITES.len()]).collect();
    let sensors: Vec<&str> = (0..rows).map(|i| SENSORS[(i / 3) % SENSORS.len()]).collect();

    let site = Column::from_texts("site", sites);
    let reading = Column::new(
        "reading",
        (0..rows)
            .map(|i| {
                if i % 7 == 3 {
                    Cell::Missing
                } else {
                    Cell::Real((i % 50) as f64 * 0.5)
                }
            })
            .collect(),
    );
    let sensor = Column::from_texts("sensor", sensors);
    let battery = Column::from_reals(
        "battery",
        (0..rows).map(|i| 100.0 - (i % 100) as f64).collect(),
    );

    // Columns are built with the same row count.
    Table::new(vec![site, reading, sensor, battery]).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_pattern() {
        let pattern = GapPattern {
            period: 10,
            gap: 2,
            offset: 3,
        };
        let missing: Vec<usize> = (0..20).filter(|&i| pattern.is_missing(i)).collect();
        assert_eq!(missing, vec![3, 4, 13, 14]);
        assert!(!GapPattern::none().is_missing(0));
    }

    #[test]
    fn test_sensor_table_shape() {
        let table = sensor_table(30);
        assert_eq!(table.shape(), (30, 4));
        assert_eq!(table.column(1).unwrap().cells()[3], Cell::Missing);
    }
}
