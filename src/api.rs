//! # Facade
//!
//! [`LinkStash`] ties a [`Store`] to the command layer: every mutating call
//! is load → command → save, so each surface (popup, manager page, import
//! dialog) works on a freshly loaded document and the stored copy is always
//! the one the last writer produced.

use chrono::Local;

use crate::commands::{
    archive, containers, dedupe as dedupe_cmd, export, import, move_links, save, tabs, trash,
    Destination, KeepStrategy, LinkRef,
};
use crate::commands::import::{ImportMode, OneTabReport};
use crate::commands::save::NewLink;
use crate::dedupe::{self, DuplicateGroup};
use crate::error::Result;
use crate::model::{Document, Link};
use crate::normalize::UrlNormalizer;
use crate::settings::{self, Settings};
use crate::store::Store;

pub struct LinkStash<S: Store> {
    store: S,
    settings: Settings,
    /// Compiled from `settings.cleanup`; rebuilt on settings change.
    normalizer: UrlNormalizer,
    /// Same rules with tracking stripping forced on, for the duplicates
    /// view's aggressive toggle.
    aggressive: UrlNormalizer,
}

impl<S: Store> LinkStash<S> {
    pub fn new(store: S) -> Self {
        Self::with_settings(store, Settings::default())
    }

    pub fn with_settings(store: S, settings: Settings) -> Self {
        let normalizer = UrlNormalizer::new(&settings.cleanup);
        let aggressive =
            UrlNormalizer::new(&settings.cleanup.clone().with_tracking_stripping(true));
        LinkStash {
            store,
            settings,
            normalizer,
            aggressive,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.normalizer = UrlNormalizer::new(&settings.cleanup);
        self.aggressive =
            UrlNormalizer::new(&settings.cleanup.clone().with_tracking_stripping(true));
        self.settings = settings;
    }

    /// The current document, healed if the stored copy needed it.
    pub fn document(&self) -> Result<Document> {
        self.store.load()
    }

    fn mutate<T>(&self, f: impl FnOnce(&mut Document) -> T) -> Result<T> {
        let mut doc = self.store.load()?;
        let out = f(&mut doc);
        self.store.save(&doc)?;
        Ok(out)
    }

    // Tabs.

    pub fn create_tab(&self, name: &str) -> Result<String> {
        self.mutate(|doc| tabs::create(doc, name))
    }

    pub fn rename_tab(&self, tab_id: &str, name: &str) -> Result<bool> {
        self.mutate(|doc| tabs::rename(doc, tab_id, name))
    }

    pub fn delete_tab(&self, tab_id: &str) -> Result<bool> {
        self.mutate(|doc| tabs::delete(doc, tab_id))
    }

    // Containers.

    pub fn create_container(&self, tab_id: &str, name: &str) -> Result<Option<String>> {
        self.mutate(|doc| containers::create(doc, tab_id, name))
    }

    pub fn rename_container(&self, tab_id: &str, container_id: &str, name: &str) -> Result<bool> {
        self.mutate(|doc| containers::rename(doc, tab_id, container_id, name))
    }

    pub fn delete_container(&self, tab_id: &str, container_id: &str) -> Result<bool> {
        self.mutate(|doc| containers::delete(doc, tab_id, container_id))
    }

    pub fn trash_all_in_container(&self, tab_id: &str, container_id: &str) -> Result<usize> {
        self.mutate(|doc| containers::trash_all(doc, tab_id, container_id))
    }

    // Saving.

    pub fn save_link(&self, destination: Option<&Destination>, new: NewLink) -> Result<LinkRef> {
        self.mutate(|doc| save::add_link(doc, destination, new))
    }

    /// Send-all-tabs: the whole batch lands in one new container named from
    /// the configured format and the current local time.
    pub fn save_batch(&self, batch: Vec<NewLink>) -> Result<Destination> {
        let name =
            settings::format_container_name(&Local::now(), &self.settings.container_name_format);
        let tab_id = self.settings.send_all_tabs_destination.clone();
        self.mutate(move |doc| {
            save::add_links_as_container(doc, tab_id.as_deref(), &name, batch)
        })
    }

    pub fn edit_link(&self, link: &LinkRef, title: &str, url: &str) -> Result<bool> {
        self.mutate(|doc| save::edit_link(doc, link, title, url))
    }

    pub fn toggle_lock(&self, link: &LinkRef) -> Result<Option<bool>> {
        self.mutate(|doc| save::toggle_lock(doc, link))
    }

    // Trash.

    pub fn trash_link(&self, link: &LinkRef) -> Result<Option<Link>> {
        self.mutate(|doc| trash::move_link_to_trash(doc, link))
    }

    pub fn bulk_trash(&self, selection: &[LinkRef]) -> Result<usize> {
        self.mutate(|doc| trash::bulk_trash(doc, selection))
    }

    pub fn restore_link(&self, link_id: &str) -> Result<Option<LinkRef>> {
        self.mutate(|doc| trash::restore_link(doc, link_id))
    }

    pub fn purge_link(&self, link_id: &str) -> Result<bool> {
        self.mutate(|doc| trash::purge_link(doc, link_id))
    }

    pub fn purge_all(&self) -> Result<usize> {
        self.mutate(trash::purge_all)
    }

    // Moving.

    pub fn move_link(&self, link: &LinkRef, to: &Destination, index: usize) -> Result<bool> {
        self.mutate(|doc| move_links::move_link(doc, link, to, index))
    }

    pub fn bulk_move(&self, selection: &[LinkRef], to: &Destination) -> Result<usize> {
        self.mutate(|doc| move_links::bulk_move(doc, selection, to))
    }

    pub fn move_container(
        &self,
        from_tab_id: &str,
        container_id: &str,
        to_tab_id: &str,
        index: usize,
    ) -> Result<bool> {
        self.mutate(|doc| {
            move_links::move_container(doc, from_tab_id, container_id, to_tab_id, index)
        })
    }

    // Archive and open.

    pub fn archive_link(&self, link: &LinkRef) -> Result<bool> {
        self.mutate(|doc| archive::archive_link(doc, link))
    }

    pub fn handle_open(&self, link: &LinkRef) -> Result<Option<String>> {
        self.mutate(|doc| archive::handle_open(doc, link))
    }

    // Duplicates.

    pub fn duplicate_groups(&self, aggressive: bool) -> Result<Vec<DuplicateGroup>> {
        let doc = self.store.load()?;
        let normalizer = if aggressive {
            &self.aggressive
        } else {
            &self.normalizer
        };
        Ok(dedupe::find_duplicate_groups(&doc, normalizer))
    }

    pub fn resolve_duplicates(
        &self,
        group: &DuplicateGroup,
        strategy: KeepStrategy,
    ) -> Result<usize> {
        self.mutate(|doc| dedupe_cmd::resolve_group_to_keep(doc, group, strategy))
    }

    pub fn trash_duplicate_group(&self, group: &DuplicateGroup) -> Result<usize> {
        self.mutate(|doc| dedupe_cmd::trash_entire_group(doc, group))
    }

    // Import and export.

    pub fn import_json(&self, raw: &str, mode: ImportMode) -> Result<()> {
        let mut doc = self.store.load()?;
        import::import_json(&mut doc, raw, mode)?;
        self.store.save(&doc)
    }

    pub fn import_onetab(&self, text: &str) -> Result<OneTabReport> {
        self.mutate(|doc| import::import_onetab(doc, text))
    }

    pub fn export_json(&self) -> Result<String> {
        export::to_json(&self.store.load()?)
    }
}
