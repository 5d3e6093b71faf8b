use chrono::{DateTime, Utc};
use perch::{
    BoolQuery, Config, DocId, Document, Engine, ErrorKind, FieldValue, Mutation, Query, Schema,
};

fn tweet_schema() -> Schema {
    Schema::new()
        .add_text_field("message")
        .add_keyword_field("user_name")
        .add_date_field("posted_at")
}

fn posted_at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn tweet(id: u64, message: &str, user_name: &str, date: &str) -> Document {
    Document::new(DocId(id))
        .with_field("message", FieldValue::Text(message.to_string()))
        .with_field("user_name", FieldValue::Text(user_name.to_string()))
        .with_field("posted_at", FieldValue::Date(posted_at(date)))
}

fn corpus() -> Vec<Document> {
    vec![
        tweet(
            1,
            "How to automatically validate entities with Hibernate Validator",
            "thjanssen123",
            "2018-02-01T09:30:00Z",
        ),
        tweet(
            2,
            "Hibernate Validator 6 makes bean validation easy",
            "baeldung",
            "2018-02-02T17:15:00Z",
        ),
    ]
}

fn seeded_engine() -> Engine {
    let engine = Engine::open(tweet_schema(), Config::default()).unwrap();
    engine.rebuild_all(corpus()).unwrap();
    engine
}

#[test]
fn simple_full_text_search() {
    let engine = seeded_engine();

    let results = engine.search(&Query::keyword("message", "validate Hibernate")).unwrap();
    assert_eq!(results, vec![DocId(1), DocId(2)]);
}

#[test]
fn stemming_equivalence() {
    let engine = seeded_engine();

    let results1 = engine.search(&Query::keyword("message", "validate Hibernate")).unwrap();
    let results2 = engine.search(&Query::keyword("message", "validation Hibernate")).unwrap();
    let results3 = engine.search(&Query::keyword("message", "VALIDATION Hibernate")).unwrap();

    assert_eq!(results1.len(), 2);
    assert_eq!(results1, results2);
    assert_eq!(results2, results3);
}

#[test]
fn index_update_becomes_visible() {
    let engine = seeded_engine();
    let query = Query::keyword("message", "Message updated");

    // No tweet matches the search string yet
    assert!(engine.search(&query).unwrap().is_empty());

    let updated = tweet(
        1,
        "Message updated - How to automatically validate entities with Hibernate Validator",
        "thjanssen123",
        "2018-02-01T09:30:00Z",
    );
    engine.update(DocId(1), updated).unwrap();

    // Exactly the updated tweet matches now
    assert_eq!(engine.search(&query).unwrap(), vec![DocId(1)]);
}

#[test]
fn removed_document_leaves_match_all() {
    let engine = seeded_engine();
    engine.index(tweet(99, "temporary tweet", "someone", "2018-03-01T00:00:00Z")).unwrap();
    assert!(engine.search(&Query::MatchAll).unwrap().contains(&DocId(99)));

    engine.remove(DocId(99)).unwrap();

    let all = engine.search(&Query::MatchAll).unwrap();
    assert!(!all.contains(&DocId(99)));
    assert_eq!(all, vec![DocId(1), DocId(2)]);
}

#[test]
fn identical_queries_return_identical_orderings() {
    let engine = seeded_engine();
    let query = Query::keyword("message", "validation Hibernate");

    let first = engine.search(&query).unwrap();
    let second = engine.search(&query).unwrap();
    assert_eq!(first, second);
}

#[test]
fn multi_word_queries_are_conjunctive() {
    let engine = seeded_engine();

    let results = engine.search(&Query::keyword("message", "validate nonexistent")).unwrap();
    assert!(results.is_empty());
}

#[test]
fn boolean_combinations() {
    let engine = seeded_engine();

    let must = Query::Bool(
        BoolQuery::new()
            .with_must(Query::keyword("message", "validate"))
            .with_must(Query::keyword("user_name", "thjanssen123")),
    );
    assert_eq!(engine.search(&must).unwrap(), vec![DocId(1)]);

    let should = Query::Bool(
        BoolQuery::new()
            .with_should(Query::keyword("user_name", "baeldung"))
            .with_should(Query::keyword("user_name", "nobody")),
    );
    assert_eq!(engine.search(&should).unwrap(), vec![DocId(2)]);

    let not = Query::Bool(
        BoolQuery::new()
            .with_must(Query::MatchAll)
            .with_must_not(Query::keyword("message", "bean")),
    );
    assert_eq!(engine.search(&not).unwrap(), vec![DocId(1)]);
}

#[test]
fn keyword_field_matches_exact_lowercased_value() {
    let engine = seeded_engine();

    // Case-insensitive on the whole value, no stemming or splitting
    let results = engine.search(&Query::keyword("user_name", "ThJanssen123")).unwrap();
    assert_eq!(results, vec![DocId(1)]);

    let partial = engine.search(&Query::keyword("user_name", "thjanssen")).unwrap();
    assert!(partial.is_empty());
}

#[test]
fn unknown_query_field_is_rejected() {
    let engine = seeded_engine();

    let err = engine.search(&Query::keyword("no_such_field", "text")).unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidField);
}

#[test]
fn update_of_unknown_id_is_an_insert() {
    let engine = seeded_engine();

    engine
        .update(DocId(7), tweet(7, "fresh tweet", "newcomer", "2018-04-01T00:00:00Z"))
        .unwrap();

    assert!(engine.contains(DocId(7)));
    assert_eq!(engine.search(&Query::keyword("message", "fresh")).unwrap(), vec![DocId(7)]);
}

#[test]
fn remove_of_unknown_id_is_a_noop() {
    let engine = seeded_engine();
    let before = engine.doc_count();

    engine.remove(DocId(12345)).unwrap();
    assert_eq!(engine.doc_count(), before);
}

#[test]
fn mutations_apply_in_order() {
    let engine = seeded_engine();

    engine
        .apply(Mutation::Index(tweet(3, "brand new tweet", "someone", "2018-05-01T00:00:00Z")))
        .unwrap();
    assert!(engine.contains(DocId(3)));

    engine
        .apply(Mutation::Update(
            DocId(3),
            tweet(3, "edited tweet", "someone", "2018-05-01T00:00:00Z"),
        ))
        .unwrap();
    assert_eq!(engine.search(&Query::keyword("message", "edited")).unwrap(), vec![DocId(3)]);
    assert!(engine.search(&Query::keyword("message", "brand")).unwrap().is_empty());

    engine.apply(Mutation::Delete(DocId(3))).unwrap();
    assert!(!engine.contains(DocId(3)));
}

#[test]
fn stopword_only_query_matches_nothing() {
    let engine = seeded_engine();

    let results = engine.search(&Query::keyword("message", "the with and")).unwrap();
    assert!(results.is_empty());
}

#[test]
fn analyzer_diagnostics() {
    let engine = seeded_engine();

    let tokens = engine
        .analyze("message", "How to automatically validate entities with Hibernate Validator")
        .unwrap();
    let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();

    assert!(texts.contains(&"valid"));
    assert!(texts.contains(&"hibern"));
    assert!(!texts.contains(&"to"));
    assert!(!texts.contains(&"with"));
    assert!(texts.iter().all(|t| t.chars().all(|c| !c.is_uppercase())));

    let err = engine.analyze("no_such_field", "text").unwrap_err();
    assert_eq!(err.kind, ErrorKind::InvalidField);
}

#[test]
fn ranked_search_prefers_denser_matches() {
    let engine = Engine::open(tweet_schema(), Config::default()).unwrap();
    engine
        .index(Document::new(DocId(10)).with_field(
            "message",
            FieldValue::Text("rust rust rust four".to_string()),
        ))
        .unwrap();
    engine
        .index(Document::new(DocId(11)).with_field(
            "message",
            FieldValue::Text("rust two three four".to_string()),
        ))
        .unwrap();
    // A non-matching document keeps the IDF of "rust" above zero
    engine
        .index(Document::new(DocId(12)).with_field(
            "message",
            FieldValue::Text("unrelated content entirely".to_string()),
        ))
        .unwrap();

    let hits = engine.search_ranked(&Query::keyword("message", "rust")).unwrap();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].doc_id, DocId(10));
    assert!(hits[0].score > hits[1].score);
}
