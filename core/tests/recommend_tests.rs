use cinematch_core::record::{ELLIPSIS, OVERVIEW_PREVIEW_CHARS};
use cinematch_core::{build, recommend, BuildOptions, Index, MovieRecord, QueryError, PLACEHOLDER_POSTER};

fn movie(title: &str, overview: &str) -> MovieRecord {
    MovieRecord::new(title, overview, Some(format!("https://posters.example/{}.jpg", title.replace(' ', "_"))))
}

fn catalog() -> Vec<MovieRecord> {
    vec![
        movie("Inception", "A thief who steals corporate secrets through dream-sharing technology is given the inverse task of planting an idea."),
        movie("Interstellar", "A team of explorers travel through a wormhole in space in an attempt to ensure humanity's survival."),
        movie("The Martian", "An astronaut becomes stranded on Mars and must survive alone in space until rescue."),
        movie("Ratatouille", "A rat who can cook makes an unusual alliance with a young kitchen worker at a famous Paris restaurant."),
        movie("Paprika", "A machine that lets therapists enter patients' dreams is stolen, and a thief begins invading dreams."),
        movie("Gravity", "Two astronauts work together to survive after an accident leaves them stranded in space."),
        movie("Chef", "A head chef quits his restaurant job and starts a food truck to reclaim his creative cooking."),
    ]
}

fn index() -> Index {
    build(&catalog(), &BuildOptions::default()).unwrap()
}

#[test]
fn matrix_is_square_symmetric_with_unit_diagonal() {
    let index = index();
    let m = index.matrix();
    assert_eq!(m.len(), index.len());
    for i in 0..m.len() {
        assert_eq!(m.row(i).unwrap().len(), m.len());
        assert_eq!(m.get(i, i), Some(1.0));
        for j in 0..m.len() {
            let s = m.get(i, j).unwrap();
            assert_eq!(s, m.get(j, i).unwrap());
            assert!((0.0..=1.0 + 1e-6).contains(&s), "score {s} out of range");
        }
    }
}

#[test]
fn never_recommends_itself() {
    let index = index();
    for r in index.records() {
        let recs = recommend(&index, &r.title, index.len()).unwrap();
        assert_eq!(recs.len(), index.len() - 1);
        assert!(recs.iter().all(|x| x.title != r.title));
    }
}

#[test]
fn results_are_ordered_by_score_then_position() {
    let index = index();
    let recs = recommend(&index, "Gravity", 6).unwrap();
    let position = |t: &str| index.position_of(t).unwrap();
    for pair in recs.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(a.similarity_score >= b.similarity_score);
        if a.similarity_score == b.similarity_score {
            assert!(position(&a.title) < position(&b.title));
        }
    }
    let top: Vec<&str> = recs.iter().take(2).map(|r| r.title.as_str()).collect();
    assert!(top.contains(&"The Martian"));
    assert!(top.contains(&"Interstellar"));
}

#[test]
fn repeated_queries_are_identical() {
    let index = index();
    assert_eq!(recommend(&index, "Chef", 3).unwrap(), recommend(&index, "Chef", 3).unwrap());
}

#[test]
fn lookup_ignores_case() {
    let index = index();
    let a = recommend(&index, "Inception", 5).unwrap();
    assert_eq!(a, recommend(&index, "inception", 5).unwrap());
    assert_eq!(a, recommend(&index, "INCEPTION", 5).unwrap());
    assert_eq!(a[0].title, "Paprika");
}

#[test]
fn long_overviews_are_truncated() {
    let long = "space ".repeat(60);
    let records = vec![movie("Short", "space opera"), MovieRecord::new("Long", long.clone(), None)];
    let index = build(&records, &BuildOptions::default()).unwrap();

    let recs = recommend(&index, "short", 5).unwrap();
    assert_eq!(recs[0].title, "Long");
    assert!(recs[0].overview.ends_with(ELLIPSIS));
    assert_eq!(recs[0].overview.chars().count(), OVERVIEW_PREVIEW_CHARS + ELLIPSIS.len());
    assert!(long.starts_with(&recs[0].overview[..OVERVIEW_PREVIEW_CHARS]));

    let recs = recommend(&index, "long", 5).unwrap();
    assert_eq!(recs[0].overview, "space opera");
}

#[test]
fn shared_plot_outranks_unrelated_plot() {
    let records = vec![
        MovieRecord::new("A", "a shared plot about space travel", None),
        MovieRecord::new("B", "a shared plot about space travel", None),
        MovieRecord::new("C", "completely unrelated text about cooking", None),
    ];
    let index = build(&records, &BuildOptions::default()).unwrap();
    let recs = recommend(&index, "A", 2).unwrap();
    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "C"]);
    assert!(recs[0].similarity_score > recs[1].similarity_score);
    assert_eq!(recs[0].similarity_score, 1.0);
}

#[test]
fn fewer_records_than_k() {
    let records = vec![movie("Heat", "bank robbery crew"), movie("Ronin", "mercenary crew heist")];
    let index = build(&records, &BuildOptions::default()).unwrap();
    let recs = recommend(&index, "Heat", 5).unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].title, "Ronin");
}

#[test]
fn unknown_title() {
    let index = index();
    assert_eq!(recommend(&index, "Nonexistent Title", 5), Err(QueryError::NotFound("Nonexistent Title".into())));
}

#[test]
fn missing_poster_uses_placeholder() {
    let records = vec![
        movie("Jaws", "shark attacks beach town"),
        MovieRecord::new("The Meg", "giant shark attacks", None),
        MovieRecord::new("Deep Blue Sea", "shark lab", Some(String::new())),
    ];
    let index = build(&records, &BuildOptions::default()).unwrap();
    let recs = recommend(&index, "jaws", 5).unwrap();
    assert_eq!(recs.len(), 2);
    assert!(recs.iter().all(|r| r.poster_url == PLACEHOLDER_POSTER));

    let recs = recommend(&index, "the meg", 1).unwrap();
    assert_eq!(recs[0].poster_url, "https://posters.example/Jaws.jpg");
}

#[test]
fn stop_word_only_plot_ranks_below_shared_content() {
    let records = vec![
        MovieRecord::new("Q", "two detectives find first clue", None),
        MovieRecord::new("X", "two first find", None),
        MovieRecord::new("Y", "detectives chase", None),
    ];
    let index = build(&records, &BuildOptions::default()).unwrap();
    let x = index.position_of("X").unwrap();
    // every word of X is an English stop-word, so its row is all zeros
    assert!(index.matrix().row(x).unwrap().iter().all(|&s| s == 0.0));

    let recs = recommend(&index, "Q", 2).unwrap();
    let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Y", "X"]);
    assert!(recs[0].similarity_score > 0.0);
    assert_eq!(recs[1].similarity_score, 0.0);
}
