use std::collections::{BTreeMap, HashMap};

use super::filter::FilteredView;

/// Number of brands kept in the average-price-by-brand ranking.
pub const TOP_BRANDS: usize = 15;

/// Mean price of one group of listings.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean<K> {
    pub key: K,
    pub mean_price: f64,
}

// ---------------------------------------------------------------------------
// Aggregator – statistics over a filtered view
// ---------------------------------------------------------------------------

/// Summary statistics over a [`FilteredView`].
///
/// Every call recomputes from the view. The view is never empty, so the means
/// are always defined.
pub struct Aggregator<'v, 'a> {
    view: &'v FilteredView<'a>,
}

impl<'v, 'a> Aggregator<'v, 'a> {
    pub fn new(view: &'v FilteredView<'a>) -> Self {
        Aggregator { view }
    }

    pub fn count(&self) -> usize {
        self.view.len()
    }

    pub fn mean_price(&self) -> f64 {
        self.view.iter().map(|r| r.price_usd).sum::<f64>() / self.count() as f64
    }

    pub fn mean_mileage(&self) -> f64 {
        self.view.iter().map(|r| r.mileage_kmpl).sum::<f64>() / self.count() as f64
    }

    /// Mean price per brand, most expensive first, at most [`TOP_BRANDS`].
    /// Brands with equal means keep the order in which they first appear.
    pub fn brand_mean_prices(&self) -> Vec<GroupMean<String>> {
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, f64, usize)> = Vec::new();

        for rec in self.view.iter() {
            let slot = *slots.entry(rec.brand.as_str()).or_insert_with(|| {
                groups.push((rec.brand.as_str(), 0.0, 0));
                groups.len() - 1
            });
            let (_, sum, n) = &mut groups[slot];
            *sum += rec.price_usd;
            *n += 1;
        }

        let mut means: Vec<GroupMean<String>> = groups
            .into_iter()
            .map(|(brand, sum, n)| GroupMean {
                key: brand.to_string(),
                mean_price: sum / n as f64,
            })
            .collect();

        // `sort_by` is stable, which keeps first-seen order for ties.
        means.sort_by(|a, b| b.mean_price.total_cmp(&a.mean_price));
        means.truncate(TOP_BRANDS);
        means
    }

    /// Mean price per model year, oldest first.
    pub fn year_mean_prices(&self) -> Vec<GroupMean<i32>> {
        let mut by_year: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for rec in self.view.iter() {
            let (sum, n) = by_year.entry(rec.make_year).or_insert((0.0, 0));
            *sum += rec.price_usd;
            *n += 1;
        }

        by_year
            .into_iter()
            .map(|(year, (sum, n))| GroupMean {
                key: year,
                mean_price: sum / n as f64,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Summary – one full recomputation pass
// ---------------------------------------------------------------------------

/// All aggregates the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean_price: f64,
    pub mean_mileage: f64,
    pub by_brand: Vec<GroupMean<String>>,
    pub by_year: Vec<GroupMean<i32>>,
}

impl Summary {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        let agg = Aggregator::new(view);
        Summary {
            count: agg.count(),
            mean_price: agg.mean_price(),
            mean_mileage: agg.mean_mileage(),
            by_brand: agg.brand_mean_prices(),
            by_year: agg.year_mean_prices(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use approx::assert_relative_eq;

    use super::*;
    use crate::data::criteria::{CriteriaDraft, FilterCriteria};
    use crate::data::filter::apply;
    use crate::data::model::tests::{listing, two_listings};
    use crate::data::model::Dataset;

    fn everything(ds: &Dataset) -> FilteredView<'_> {
        apply(ds, &FilterCriteria::defaults(ds.profile())).unwrap()
    }

    #[test]
    fn single_match_metrics() {
        let ds = two_listings();
        let mut draft = CriteriaDraft::from_profile(ds.profile());
        draft.year_min = 2019;
        let criteria = draft.validate(ds.profile()).unwrap();
        let view = apply(&ds, &criteria).unwrap();
        let agg = Aggregator::new(&view);

        assert_eq!(agg.count(), 1);
        assert_relative_eq!(agg.mean_price(), 15000.0);
        assert_relative_eq!(agg.mean_mileage(), 18.0);
    }

    #[test]
    fn brand_means_group_repeated_brands() {
        let ds = Dataset::from_records(vec![
            listing(2018, "Toyota", None, "Manual", 10000.0, 1, None, 15.0),
            listing(2019, "Honda", None, "Manual", 12000.0, 1, None, 16.0),
            listing(2020, "Toyota", None, "Manual", 20000.0, 1, None, 17.0),
        ])
        .unwrap();
        let view = everything(&ds);
        let by_brand = Aggregator::new(&view).brand_mean_prices();

        assert_eq!(
            by_brand,
            vec![
                GroupMean { key: "Toyota".to_string(), mean_price: 15000.0 },
                GroupMean { key: "Honda".to_string(), mean_price: 12000.0 },
            ]
        );
    }

    #[test]
    fn brand_ties_keep_first_seen_order() {
        let ds = Dataset::from_records(vec![
            listing(2018, "Mazda", None, "Manual", 9000.0, 1, None, 15.0),
            listing(2018, "Audi", None, "Manual", 9000.0, 1, None, 15.0),
            listing(2018, "Kia", None, "Manual", 11000.0, 1, None, 15.0),
        ])
        .unwrap();
        let view = everything(&ds);
        let keys: Vec<String> = Aggregator::new(&view)
            .brand_mean_prices()
            .into_iter()
            .map(|g| g.key)
            .collect();

        assert_eq!(keys, ["Kia", "Mazda", "Audi"]);
    }

    #[test]
    fn brand_ranking_is_truncated_and_descending() {
        let records = (0..20)
            .map(|i| {
                let brand = format!("Brand{i:02}");
                listing(2015, &brand, None, "Manual", 1000.0 * f64::from(i + 1), 1, None, 10.0)
            })
            .collect();
        let ds = Dataset::from_records(records).unwrap();
        let view = everything(&ds);
        let by_brand = Aggregator::new(&view).brand_mean_prices();

        assert_eq!(by_brand.len(), TOP_BRANDS);
        assert!(by_brand.windows(2).all(|w| w[0].mean_price >= w[1].mean_price));
        assert_eq!(by_brand[0].key, "Brand19");
    }

    #[test]
    fn year_means_are_ascending_and_cover_every_year() {
        let ds = Dataset::from_records(vec![
            listing(2021, "Ford", None, "Manual", 30000.0, 1, None, 12.0),
            listing(2017, "Ford", None, "Manual", 8000.0, 1, None, 12.0),
            listing(2021, "Ford", None, "Manual", 20000.0, 1, None, 12.0),
            listing(2019, "Ford", None, "Manual", 14000.0, 1, None, 12.0),
        ])
        .unwrap();
        let view = everything(&ds);
        let by_year = Aggregator::new(&view).year_mean_prices();

        let years: Vec<i32> = by_year.iter().map(|g| g.key).collect();
        assert_eq!(years, [2017, 2019, 2021]);
        assert_relative_eq!(by_year[2].mean_price, 25000.0);

        let distinct: BTreeSet<i32> = view.iter().map(|r| r.make_year).collect();
        assert_eq!(distinct.into_iter().collect::<Vec<_>>(), years);
    }

    #[test]
    fn summary_bundles_every_aggregate() {
        let ds = two_listings();
        let view = everything(&ds);
        let summary = Summary::compute(&view);

        assert_eq!(summary.count, 2);
        assert_relative_eq!(summary.mean_price, 12500.0);
        assert_relative_eq!(summary.mean_mileage, 16.6, epsilon = 1e-9);
        assert_eq!(summary.by_brand[0].key, "Honda");
        assert_eq!(summary.by_year.len(), 2);
    }
}
