//! Shared test fixtures for store and route tests.

use slideforge::models::presentation::{
    NewPresentation, PresentationSettings, Slide, SlideLayout,
};

pub fn slide(id: &str, title: &str) -> Slide {
    Slide {
        id: id.to_string(),
        title: title.to_string(),
        bullets: vec![format!("{title} point one"), format!("{title} point two")],
        layout: SlideLayout::TitleBullets,
        images: vec![],
        notes: None,
    }
}

pub fn new_presentation(title: &str) -> NewPresentation {
    NewPresentation {
        title: title.to_string(),
        prompt: "make me a deck".to_string(),
        slides: vec![slide("slide-1", "One"), slide("slide-2", "Two")],
        theme: "professional".to_string(),
        settings: PresentationSettings::default(),
    }
}
