use docsearch_index::{Category, IndexStore, SearchQuery};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("search_index.js")
}

fn load_fixture() -> IndexStore {
    IndexStore::open(fixture_path()).expect("fixture loads")
}

fn titles(entries: &[&docsearch_index::DocEntry]) -> Vec<String> {
    entries.iter().map(|entry| entry.title.clone()).collect()
}

#[test]
fn generated_index_loads_in_order() {
    let store = load_fixture();
    assert_eq!(store.len(), 23);
    assert_eq!(store.pages(), vec!["Home"]);

    let first = store.get(0).expect("first entry");
    assert_eq!(first.location, "");
    assert_eq!(first.text, "CurrentModule = SatelliteDataSources");
    assert_eq!(first.category, Category::Page);

    let last = store.get(22).expect("last entry");
    assert_eq!(last.title, "SatelliteDataSources.wavelengths");
    assert_eq!(last.category, Category::Function);

    let stats = store.stats();
    assert_eq!(stats.categories[&Category::Page], 4);
    assert_eq!(stats.categories[&Category::Section], 1);
    assert_eq!(stats.categories[&Category::Type], 4);
    assert_eq!(stats.categories[&Category::Function], 4);
    assert_eq!(stats.categories[&Category::Method], 10);
}

#[test]
fn search_is_case_insensitive_and_ordered() {
    let store = load_fixture();

    assert_eq!(
        titles(&store.search("landsat")),
        vec![
            "SatelliteDataSources.Landsat8",
            "SatelliteDataSources.Landsat9"
        ]
    );
    assert_eq!(store.search("home"), store.search("Home"));
    assert_eq!(store.search("HOME").len(), 4);
    assert_eq!(
        titles(&store.search("digital numbers")),
        vec![
            "SatelliteDataSources.dn_offset",
            "SatelliteDataSources.dn_scale"
        ]
    );
    assert!(store.search("nomatch").is_empty());
}

#[test]
fn query_narrows_by_category() {
    let store = load_fixture();

    let functions = SearchQuery::new("wavelength").category(Category::Function);
    assert_eq!(
        titles(&store.query(&functions)),
        vec![
            "SatelliteDataSources.bandnames",
            "SatelliteDataSources.wavelengths"
        ]
    );

    let band_methods = SearchQuery::new("_band").category(Category::Method).limit(3);
    assert_eq!(
        titles(&store.query(&band_methods)),
        vec![
            "SatelliteDataSources.blue_band",
            "SatelliteDataSources.green_band",
            "SatelliteDataSources.nir_band"
        ]
    );
}

#[test]
fn entries_expose_summaries_and_symbol_names() {
    let store = load_fixture();
    let getlayers = store
        .search("getlayers(")
        .into_iter()
        .find(|entry| entry.category == Category::Method)
        .expect("getlayers method");

    assert_eq!(getlayers.symbol_name(), Some("getlayers"));
    assert!(getlayers.summary().starts_with("getlayers(::Type{T}, dir::String"));

    let anchored = store.by_location("#SatelliteDataSources.Sentinel2");
    assert_eq!(anchored.len(), 1);
    assert_eq!(
        anchored[0].summary(),
        "Implements the AbstractSatellite interface for Sentinel 2."
    );
}

#[test]
fn bare_json_and_script_forms_agree() {
    let raw = std::fs::read_to_string(fixture_path()).expect("read fixture");
    let (_, json) = raw.split_once('=').expect("script assignment");

    let from_script = IndexStore::load(&raw).expect("script form");
    let from_json = IndexStore::load(json).expect("json form");
    assert_eq!(from_script.entries(), from_json.entries());
}
