// Integration tests for DineWise
use dinewise_core::{NumericAttribute, RestaurantRecord, UserVisit, Weekday, UNCLUSTERED};
use dinewise_engine::{BrowseFilter, EngineConfig, RecommendRequest, Recommender, Scorer};
use dinewise_storage::{load_restaurants, load_visits};
use std::io::Write;
use std::sync::Arc;

const HEADER: &str = "placeID,name,rest_latitude,rest_longitude,Rcuisine_x,Rcuisine_y,alcohol,smoking_area,price,Rambience,distance_km,popularity_score_scaled,food_rating_scaled,service_rating_scaled,trending_score,group_friendly_score,avg_rating,days_Mon;Tue;Wed;Thu;Fri;,days_Sat;,days_Sun;,hours";

fn restaurant_rows() -> Vec<String> {
    let cuisines = [
        ("Mexican", "Mexican;Bar"),
        ("Italian", "Italian;Pizzeria"),
        ("Cafeteria", "Cafeteria;Coffee_Shop"),
        ("Japanese", "Japanese"),
        ("Mexican", "Regional"),
        ("Bar", "Bar;Bar_Pub_Brewery"),
    ];
    let prices = ["low", "medium", "high"];
    let alcohol = ["No_Alcohol_Served", "Wine-Beer", "Full_Bar"];

    (0..12)
        .map(|i| {
            // Two geographic blobs, six restaurants each
            let (lat, lon) = if i < 6 { (22.15, -100.98) } else { (18.92, -99.23) };
            let jitter = (i % 6) as f64 * 0.002;
            let (primary, secondary) = cuisines[i % cuisines.len()];
            format!(
                "{id},Restaurant {id},{lat},{lon},{primary},{secondary},{alcohol},none,{price},familiar,{distance},{pop},{food},{service},{trend},{group},{rating},{weekday},{sat},{sun},{hours}",
                id = 132000 + i,
                lat = lat + jitter,
                lon = lon - jitter,
                alcohol = alcohol[i % 3],
                price = prices[(i / 2) % 3],
                distance = 1.0 + i as f64 * 2.5,
                pop = (i as f64 * 0.08).min(1.0),
                food = ((i * 7) % 10) as f64 / 10.0,
                service = ((i * 3) % 10) as f64 / 10.0,
                trend = (i % 4) as f64 / 4.0,
                group = ((i * 5) % 11) as f64 / 10.0,
                rating = 2.0 + (i % 5) as f64 * 0.6,
                weekday = (i % 2 == 0) as u8,
                sat = (i % 3 == 0) as u8,
                sun = (i % 4 == 0) as u8,
                hours = if i % 2 == 0 { "08:00-14:00;" } else { "17:00-23:30;" },
            )
        })
        .collect()
}

struct Dataset {
    restaurants: tempfile::NamedTempFile,
    visits: tempfile::NamedTempFile,
}

fn dataset() -> Dataset {
    let mut restaurants = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(restaurants, "{}", HEADER).unwrap();
    for row in restaurant_rows() {
        writeln!(restaurants, "{}", row).unwrap();
    }

    let mut visits = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(visits, "userID,placeID,rating,food_rating,service_rating").unwrap();
    for (user, place, rating) in [
        ("U1077", 132001, 1),
        ("U1077", 132004, 2),
        ("U1077", 132010, 2),
        ("U1068", 132007, 0),
        ("U1068", 132008, 1),
        ("U1068", 999999, 2),
    ] {
        writeln!(visits, "{},{},{},1,1", user, place, rating).unwrap();
    }

    Dataset { restaurants, visits }
}

fn recommender(data: &Dataset) -> Recommender {
    let restaurants = load_restaurants(data.restaurants.path()).unwrap();
    let visits = load_visits(data.visits.path()).unwrap();
    Recommender::build(restaurants, visits, EngineConfig::default()).unwrap()
}

#[test]
fn test_multi_hot_matches_tag_count() {
    let data = dataset();
    let rec = recommender(&data);
    let model = rec.model();
    let layout = model.encoder().layout();

    for (record, vector) in model.restaurants().iter().zip(model.features()) {
        assert_eq!(vector.block_sum(layout.cuisine.clone()) as usize, record.cuisines.len());
        for (_, range) in &layout.categorical {
            assert!(vector.block_sum(range.clone()) <= 1.0);
        }
        for &v in &vector.as_slice()[layout.numeric.clone()] {
            assert!((0.0..=1.0).contains(&v));
        }
    }
}

#[test]
fn test_similarity_matrix_properties() {
    let data = dataset();
    let rec = recommender(&data);
    let model = rec.model();
    let sim = model.similarity();

    assert_eq!(sim.len(), 12);
    for i in 0..sim.len() {
        assert!((sim.get(i, i) - 1.0).abs() < 1e-6);
        for j in 0..sim.len() {
            assert_eq!(sim.get(i, j), sim.get(j, i));
            assert!(sim.get(i, j) >= -1e-6 && sim.get(i, j) <= 1.0 + 1e-6);
        }
    }
}

#[test]
fn test_top_n_bounds() {
    let data = dataset();
    let rec = recommender(&data);

    for top_n in [1, 5, 12, 40] {
        let results = rec
            .recommend(&RecommendRequest::new("U1077").with_top_n(top_n))
            .unwrap();
        assert_eq!(results.len(), top_n.min(12));
    }
    assert_eq!(rec.recommend(&RecommendRequest::new("U1077")).unwrap().len(), 10);
}

#[test]
fn test_anchor_is_first_top_rated_visit() {
    let data = dataset();
    let rec = recommender(&data);

    let response = rec
        .recommend_explained(&RecommendRequest::new("U1077").with_top_n(12))
        .unwrap();
    assert_eq!(response.anchor.as_str(), "132004");

    let anchor = response
        .result
        .iter()
        .find(|c| c.restaurant.place_id == response.anchor)
        .unwrap();
    assert!((anchor.base_score - 1.0).abs() < 1e-6);
}

#[test]
fn test_unknown_user_leaves_state_untouched() {
    let data = dataset();
    let rec = recommender(&data);
    let before = rec.stats();

    let err = rec.recommend(&RecommendRequest::new("U9999")).unwrap_err();
    assert!(matches!(err, dinewise_core::Error::UserNotFound(ref u) if u == "U9999"));
    assert_eq!(rec.stats(), before);
    assert!(rec.recommend(&RecommendRequest::new("U1068")).is_ok());
}

#[test]
fn test_soft_filters_never_exclude() {
    let data = dataset();
    let rec = recommender(&data);

    let request = RecommendRequest::new("U1068")
        .with_cuisine("japanese")
        .with_max_distance_km(0.5)
        .with_min_group_score(2.0)
        .with_days([Weekday::Sun])
        .with_top_n(12);
    let results = rec.recommend(&request).unwrap();
    assert_eq!(results.len(), 12);

    for candidate in &results {
        let expected = candidate.adjustments.apply(candidate.base_score);
        assert!((candidate.score - expected).abs() < 1e-6);
        assert_eq!(candidate.adjustments.distance, -0.05);
        assert_eq!(candidate.adjustments.group, 0.0);
    }
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
}

#[test]
fn test_distance_bonus_gap() {
    let within = RestaurantRecord::new("A", "Within").with_numeric(NumericAttribute::DistanceKm, 4.0);
    let outside = RestaurantRecord::new("B", "Outside").with_numeric(NumericAttribute::DistanceKm, 40.0);
    let request = RecommendRequest::new("U1");

    let ranked = Scorer::default().rank(&[outside, within], &[0.42, 0.42], &request, 2);
    assert_eq!(ranked[0].restaurant.place_id.as_str(), "A");
    assert!(ranked[0].score - ranked[1].score >= 0.15 - 1e-6);
}

#[test]
fn test_worked_example() {
    let r1 = RestaurantRecord::new("R1", "Trattoria")
        .with_cuisine_source("Italian")
        .with_numeric(NumericAttribute::DistanceKm, 3.0)
        .with_numeric(NumericAttribute::GroupFriendly, 0.8)
        .with_days(&[Weekday::Fri]);
    let r2 = RestaurantRecord::new("R2", "Taqueria")
        .with_cuisine_source("Mexican")
        .with_numeric(NumericAttribute::DistanceKm, 20.0)
        .with_numeric(NumericAttribute::GroupFriendly, 0.3);

    let request = RecommendRequest::new("U1")
        .with_cuisine("italian")
        .with_max_distance_km(10.0)
        .with_min_group_score(0.5)
        .with_days([Weekday::Fri]);

    let scorer = Scorer::default();
    let top = scorer.rank(&[r1.clone(), r2.clone()], &[0.6, 0.5], &request, 1);
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].restaurant.place_id.as_str(), "R1");
    assert!((top[0].score - 1.0).abs() < 1e-6);

    let both = scorer.rank(&[r1, r2], &[0.6, 0.5], &request, 2);
    assert!((both[1].score - 0.45).abs() < 1e-6);
}

#[test]
fn test_clusters_and_vocabulary() {
    let data = dataset();
    let rec = recommender(&data);

    let vocab = rec.cuisine_vocabulary();
    assert!(vocab.windows(2).all(|w| w[0] < w[1]));
    assert!(vocab.contains(&"bar_pub_brewery".to_string()));

    let stats = rec.stats();
    assert_eq!(stats.clusters, 2);
    let west = rec.cluster_of(&"132000".into()).unwrap();
    let east = rec.cluster_of(&"132011".into()).unwrap();
    assert_ne!(west, UNCLUSTERED);
    assert_ne!(east, UNCLUSTERED);
    assert_ne!(west, east);
    assert_eq!(rec.cluster_of(&"132003".into()), Some(west));
}

#[test]
fn test_browse_orders_by_rating() {
    let data = dataset();
    let rec = recommender(&data);

    let filter = BrowseFilter {
        cuisine: Some("mexican".to_string()),
        ..Default::default()
    };
    let results = rec.browse(&filter, Some(10)).unwrap();
    assert!(!results.is_empty());
    for pair in results.windows(2) {
        assert!(pair[0].avg_rating >= pair[1].avg_rating);
    }
    assert!(results
        .iter()
        .all(|r| r.primary_cuisine.as_deref() == Some("Mexican")));
}

#[test]
fn test_model_swap_under_load() {
    let data = dataset();
    let rec = Arc::new(recommender(&data));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let rec = rec.clone();
            std::thread::spawn(move || {
                for _ in 0..50 {
                    let results = rec
                        .recommend(&RecommendRequest::new("U1077").with_top_n(3))
                        .unwrap();
                    assert_eq!(results.len(), 3);
                }
            })
        })
        .collect();

    let restaurants = load_restaurants(data.restaurants.path()).unwrap();
    let mut visits = load_visits(data.visits.path()).unwrap();
    visits.push(UserVisit::new("U2000", "132005", 2.0));
    for _ in 0..3 {
        rec.reload(restaurants.clone(), visits.clone()).unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(rec.stats().users, 3);
    assert!(rec.recommend(&RecommendRequest::new("U2000")).is_ok());

    // A failed rebuild keeps the current model
    assert!(rec.reload(Vec::new(), visits).is_err());
    assert_eq!(rec.stats().restaurants, 12);
}
