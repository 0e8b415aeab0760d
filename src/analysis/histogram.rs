/// One equal-width histogram bucket
#[derive(Debug, Clone, PartialEq)]
pub struct Bin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram over the finite values of a column
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Histogram {
    pub bins: Vec<Bin>,
}

impl Histogram {
    /// Bucket values into `bins` equal-width bins spanning [min, max]
    ///
    /// Bins are half-open except the last, which includes the maximum.
    /// Non-finite values are ignored. A constant column yields one bin.
    pub fn from_values(values: &[f64], bins: usize) -> Self {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        let Some(min) = finite.iter().copied().reduce(f64::min) else {
            return Self::default();
        };
        let max = finite.iter().copied().fold(min, f64::max);

        if min == max {
            return Self {
                bins: vec![Bin {
                    lower: min,
                    upper: max,
                    count: finite.len(),
                }],
            };
        }

        let n = bins.max(1);
        let width = (max - min) / n as f64;
        let mut out: Vec<Bin> = (0..n)
            .map(|i| Bin {
                lower: min + width * i as f64,
                upper: if i + 1 == n { max } else { min + width * (i + 1) as f64 },
                count: 0,
            })
            .collect();

        for v in finite {
            let index = (((v - min) / width) as usize).min(n - 1);
            out[index].count += 1;
        }

        Self { bins: out }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Render as a text bar chart, longest bar `width` characters
    pub fn render(&self, width: usize) -> String {
        let peak = self.bins.iter().map(|b| b.count).max().unwrap_or(0);
        let mut output = String::new();

        for bin in &self.bins {
            let bar_len = if peak == 0 {
                0
            } else {
                (bin.count * width).div_ceil(peak)
            };
            output.push_str(&format!(
                "{:>10.2} - {:<10.2} | {:<width$} {}\n",
                bin.lower,
                bin.upper,
                "#".repeat(bar_len),
                bin.count,
                width = width
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_width_bins() {
        let histogram = Histogram::from_values(&[0.0, 1.0, 2.0, 3.0, 4.0], 4);

        assert_eq!(histogram.bins.len(), 4);
        let counts: Vec<_> = histogram.bins.iter().map(|b| b.count).collect();
        // Maximum lands in the closed last bin
        assert_eq!(counts, vec![1, 1, 1, 2]);
        assert_eq!(histogram.bins[3].upper, 4.0);
        assert_eq!(histogram.total(), 5);
    }

    #[test]
    fn test_constant_and_empty() {
        let constant = Histogram::from_values(&[3.0, 3.0], 20);
        assert_eq!(constant.bins.len(), 1);
        assert_eq!(constant.bins[0].count, 2);

        assert!(Histogram::from_values(&[], 20).is_empty());
        assert!(Histogram::from_values(&[f64::NAN], 20).is_empty());
    }

    #[test]
    fn test_render_scales_bars() {
        let histogram = Histogram::from_values(&[1.0, 2.0, 2.0, 2.0], 2);
        let text = histogram.render(6);
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("## "));
        assert!(lines[1].contains("###### 3"));
    }
}
