//! End-to-end scenarios through the facade: the flows a real session would
//! produce, against both the in-memory and the on-disk store.

use linkstash::{
    Destination, Document, ImportMode, InMemoryStore, KeepStrategy, LinkStash, NewLink,
};

fn api() -> LinkStash<InMemoryStore> {
    LinkStash::new(InMemoryStore::new())
}

#[test]
fn fresh_install_seeds_getting_started() {
    let api = api();
    let doc = api.document().unwrap();
    assert_eq!(doc.tabs.len(), 1);
    assert_eq!(doc.tabs[0].name, "Getting Started");
    assert_eq!(doc.tabs[0].containers[0].name, "Examples");
    assert_eq!(doc.active_link_count(), 2);
    assert!(doc.trash.is_empty());
}

#[test]
fn save_organize_trash_restore_session() {
    let api = api();
    let tab_id = api.create_tab("Research").unwrap();
    let container_id = api.create_container(&tab_id, "Papers").unwrap().unwrap();
    let dest = Destination {
        tab_id: tab_id.clone(),
        container_id: container_id.clone(),
    };

    let a = api
        .save_link(Some(&dest), NewLink::new("Paper A", "https://arxiv.example/a"))
        .unwrap();
    let b = api
        .save_link(Some(&dest), NewLink::new("Paper B", "https://arxiv.example/b"))
        .unwrap();

    api.trash_link(&a).unwrap().unwrap();
    let doc = api.document().unwrap();
    assert_eq!(doc.trash.len(), 1);
    assert!(doc.find_link(&b.tab_id, &b.container_id, &b.link_id).is_some());

    let restored = api.restore_link(&a.link_id).unwrap().unwrap();
    let doc = api.document().unwrap();
    assert!(doc.trash.is_empty());
    let back = doc
        .find_link(&restored.tab_id, &restored.container_id, &restored.link_id)
        .unwrap();
    assert_eq!(back.title, "Paper A");
    assert_eq!(back.deleted_at, None);
}

#[test]
fn deleting_a_tab_never_loses_links() {
    let api = api();
    let tab_id = api.create_tab("Temp").unwrap();
    let container_id = api.create_container(&tab_id, "C").unwrap().unwrap();
    let dest = Destination {
        tab_id: tab_id.clone(),
        container_id,
    };
    api.save_link(Some(&dest), NewLink::new("Kept", "https://keep.example"))
        .unwrap();

    api.delete_tab(&tab_id).unwrap();
    let doc = api.document().unwrap();
    assert!(doc.find_tab(&tab_id).is_none());
    assert_eq!(doc.trash.len(), 1);
    assert_eq!(doc.trash[0].title, "Kept");
    assert!(doc.trash[0].deleted_at.is_some());
}

#[test]
fn duplicate_cleanup_keeps_one_copy() {
    let api = api();
    for i in 0..3 {
        api.save_link(
            None,
            NewLink::new(
                format!("Copy {}", i),
                format!("https://dup.example/post?utm_source=s{}", i),
            ),
        )
        .unwrap();
    }

    let groups = api.duplicate_groups(false).unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members.len(), 3);

    let trashed = api
        .resolve_duplicates(&groups[0], KeepStrategy::Newest)
        .unwrap();
    assert_eq!(trashed, 2);
    assert!(api.duplicate_groups(false).unwrap().is_empty());
}

#[test]
fn merge_import_preserves_both_sides() {
    let api = api();
    let before = api.document().unwrap();

    // A backup from another machine that happens to reuse an id.
    let foreign = serde_json::json!({
        "tabs": [{
            "id": before.tabs[0].id,
            "name": "From Laptop",
            "containers": [{
                "id": "c-laptop",
                "name": "Queue",
                "links": [
                    {"id": "link-1", "title": "Other", "url": "https://other.example", "savedAt": 42}
                ]
            }]
        }],
        "trash": []
    })
    .to_string();
    api.import_json(&foreign, ImportMode::Merge).unwrap();

    let doc = api.document().unwrap();
    assert_eq!(doc.tabs.len(), 2);
    assert_eq!(doc.tabs[0].id, before.tabs[0].id);
    assert_ne!(doc.tabs[1].id, doc.tabs[0].id);
    assert_eq!(doc.tabs[1].name, "From Laptop");
    assert_eq!(doc.active_link_count(), before.active_link_count() + 1);
}

#[test]
fn export_then_replace_round_trips() {
    let api = api();
    api.save_link(None, NewLink::new("Mine", "https://mine.example"))
        .unwrap();
    let snapshot = api.document().unwrap();
    let backup = api.export_json().unwrap();

    api.purge_all().unwrap();
    api.create_tab("Noise").unwrap();

    api.import_json(&backup, ImportMode::Replace).unwrap();
    assert_eq!(api.document().unwrap(), snapshot);
}

#[test]
fn onetab_import_lands_in_grouped_containers() {
    let api = api();
    let text = "\
https://one.example/a | First article
https://one.example/b | Second article

https://two.example/c
http://localhost:8080/skip | Dev server
";
    let report = api.import_onetab(text).unwrap();
    assert_eq!(report.links_imported, 3);
    assert_eq!(report.containers_created, 2);

    let doc = api.document().unwrap();
    let names: Vec<&str> = doc.tabs[0]
        .containers
        .iter()
        .map(|c| c.name.as_str())
        .collect();
    assert!(names.contains(&"Imported Group 1"));
    assert!(names.contains(&"Imported Group 2"));
}

#[test]
fn corrupt_store_heals_on_load_and_stays_healed() {
    let store = InMemoryStore::with_value(serde_json::json!({
        "tabs": [
            {"id": "t", "containers": [
                {"id": "c", "links": [
                    {"id": "l", "url": "https://a.example", "deletedAt": 5},
                    {"id": "l", "title": "Twin", "url": "https://b.example", "savedAt": 3}
                ]}
            ]},
            null
        ],
        "trash": [{"title": "Lost", "url": "https://lost.example"}]
    }));
    let api = LinkStash::new(store);

    let doc = api.document().unwrap();
    let links = &doc.tabs[0].containers[0].links;
    assert_ne!(links[0].id, links[1].id);
    assert_eq!(links[0].deleted_at, None);
    assert_eq!(links[0].title, "https://a.example");
    assert!(doc.trash[0].deleted_at.is_none());
    assert!(doc.trash[0].saved_at > 0);

    // Healed once, stable afterwards.
    assert_eq!(api.document().unwrap(), doc);
}

#[test]
fn file_store_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let saved_ref;
    {
        let api = LinkStash::new(linkstash::FileStore::new(&path));
        saved_ref = api
            .save_link(None, NewLink::new("Persistent", "https://keep.example"))
            .unwrap();
    }

    let api = LinkStash::new(linkstash::FileStore::new(&path));
    let doc = api.document().unwrap();
    let link = doc
        .find_link(&saved_ref.tab_id, &saved_ref.container_id, &saved_ref.link_id)
        .unwrap();
    assert_eq!(link.title, "Persistent");
}

#[test]
fn open_and_remove_respects_the_lock() {
    let api = api();
    let locked = api
        .save_link(None, NewLink::new("Pinned", "https://pin.example"))
        .unwrap();
    let plain = api
        .save_link(None, NewLink::new("Casual", "https://once.example"))
        .unwrap();
    api.toggle_lock(&locked).unwrap();

    assert_eq!(
        api.handle_open(&plain).unwrap().as_deref(),
        Some("https://once.example")
    );
    assert_eq!(
        api.handle_open(&locked).unwrap().as_deref(),
        Some("https://pin.example")
    );

    let doc = api.document().unwrap();
    assert_eq!(doc.trash.len(), 1);
    assert_eq!(doc.trash[0].title, "Casual");
    let archived = doc.tabs[0]
        .containers
        .iter()
        .find(|c| c.name == "Archived")
        .unwrap();
    assert_eq!(archived.links[0].title, "Pinned");
}

#[test]
fn empty_document_is_legal_and_recovers_on_save() {
    let store = InMemoryStore::with_value(serde_json::json!({"tabs": [], "trash": []}));
    let api = LinkStash::new(store);
    assert!(api.document().unwrap().tabs.is_empty());

    let r = api
        .save_link(None, NewLink::new("First", "https://first.example"))
        .unwrap();
    let doc = api.document().unwrap();
    assert_eq!(doc.tabs.len(), 1);
    assert!(doc.find_link(&r.tab_id, &r.container_id, &r.link_id).is_some());
}

#[test]
fn document_wire_format_is_stable() {
    let doc = Document::seed();
    let value = serde_json::to_value(&doc).unwrap();
    assert!(value["tabs"].is_array());
    assert!(value["trash"].is_array());
    let link = &value["tabs"][0]["containers"][0]["links"][0];
    assert!(link["savedAt"].is_i64());
    assert!(link.get("deletedAt").is_none());
}
