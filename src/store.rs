//! In-memory document store: the single authoritative state holder for
//! presentations, documents, and slide images over the process lifetime.
//!
//! All state sits behind one `RwLock`, so every operation is atomic: the
//! read-modify-write inside `update_presentation` cannot interleave with
//! another mutation to the same record. Maps are keyed by id and ids are
//! assigned from monotonic per-kind counters, so ascending map order equals
//! insertion order and no id is ever reused, regardless of deletes.
//!
//! A durable store can replace this behind the same operation set without
//! touching the handlers or the generation adapter.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use crate::errors::AppError;
use crate::models::document::{Document, NewDocument};
use crate::models::presentation::{NewPresentation, Presentation, PresentationPatch};
use crate::models::slide_image::{NewSlideImage, SlideImageRecord};

struct StoreInner {
    presentations: BTreeMap<i64, Presentation>,
    documents: BTreeMap<i64, Document>,
    slide_images: BTreeMap<i64, SlideImageRecord>,
    next_presentation_id: i64,
    next_document_id: i64,
    next_slide_image_id: i64,
}

pub struct MemStore {
    inner: RwLock<StoreInner>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    pub fn new() -> Self {
        MemStore {
            inner: RwLock::new(StoreInner {
                presentations: BTreeMap::new(),
                documents: BTreeMap::new(),
                slide_images: BTreeMap::new(),
                next_presentation_id: 1,
                next_document_id: 1,
                next_slide_image_id: 1,
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreInner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::Store("store lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreInner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::Store("store lock poisoned".to_string()))
    }

    /// Create a presentation, assigning the next unused id and stamping
    /// `created_at`. Returns the full stored record.
    pub fn create_presentation(&self, new: NewPresentation) -> Result<Presentation, AppError> {
        let mut inner = self.write()?;
        let id = inner.next_presentation_id;
        inner.next_presentation_id += 1;
        let record = Presentation {
            id,
            title: new.title,
            prompt: new.prompt,
            slides: new.slides,
            theme: new.theme,
            settings: new.settings,
            created_at: Utc::now(),
        };
        inner.presentations.insert(id, record.clone());
        Ok(record)
    }

    pub fn get_presentation(&self, id: i64) -> Result<Option<Presentation>, AppError> {
        Ok(self.read()?.presentations.get(&id).cloned())
    }

    /// Shallow field-level merge: each field present in the patch wholly
    /// replaces the stored field; absent fields are untouched. `slides` and
    /// `settings` are swapped in as complete values, never merged element-
    /// or key-wise. Returns `None` for an unknown id without creating
    /// anything.
    pub fn update_presentation(
        &self,
        id: i64,
        patch: PresentationPatch,
    ) -> Result<Option<Presentation>, AppError> {
        let mut inner = self.write()?;
        let Some(existing) = inner.presentations.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = patch.title {
            existing.title = title;
        }
        if let Some(prompt) = patch.prompt {
            existing.prompt = prompt;
        }
        if let Some(slides) = patch.slides {
            existing.slides = slides;
        }
        if let Some(theme) = patch.theme {
            existing.theme = theme;
        }
        if let Some(settings) = patch.settings {
            existing.settings = settings;
        }
        Ok(Some(existing.clone()))
    }

    /// Remove a presentation. Does not cascade to documents or images, and
    /// the id is never handed out again.
    pub fn delete_presentation(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write()?.presentations.remove(&id).is_some())
    }

    pub fn create_document(&self, new: NewDocument) -> Result<Document, AppError> {
        let mut inner = self.write()?;
        let id = inner.next_document_id;
        inner.next_document_id += 1;
        let record = Document {
            id,
            filename: new.filename,
            content: new.content,
            doc_type: new.doc_type,
            presentation_id: new.presentation_id,
        };
        inner.documents.insert(id, record.clone());
        Ok(record)
    }

    /// Linear scan over the weak reference; results in insertion order.
    pub fn documents_by_presentation(
        &self,
        presentation_id: i64,
    ) -> Result<Vec<Document>, AppError> {
        Ok(self
            .read()?
            .documents
            .values()
            .filter(|d| d.presentation_id == Some(presentation_id))
            .cloned()
            .collect())
    }

    pub fn create_slide_image(&self, new: NewSlideImage) -> Result<SlideImageRecord, AppError> {
        let mut inner = self.write()?;
        let id = inner.next_slide_image_id;
        inner.next_slide_image_id += 1;
        let record = SlideImageRecord {
            id,
            filename: new.filename,
            url: new.url,
            slide_index: new.slide_index,
            presentation_id: new.presentation_id,
        };
        inner.slide_images.insert(id, record.clone());
        Ok(record)
    }

    pub fn slide_images_by_presentation(
        &self,
        presentation_id: i64,
    ) -> Result<Vec<SlideImageRecord>, AppError> {
        Ok(self
            .read()?
            .slide_images
            .values()
            .filter(|i| i.presentation_id == Some(presentation_id))
            .cloned()
            .collect())
    }

    pub fn delete_slide_image(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.write()?.slide_images.remove(&id).is_some())
    }
}
