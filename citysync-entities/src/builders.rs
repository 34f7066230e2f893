pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::event_builder::*;

pub mod event_builder {

    use super::*;
    use crate::{category::*, event::*, id::*};
    use time::OffsetDateTime;

    #[derive(Debug)]
    pub struct EventBuild {
        event: Event,
    }

    impl EventBuild {
        pub fn id(mut self, id: u64) -> Self {
            self.event.id = Id::new(id);
            self
        }
        pub fn title(mut self, title: &str) -> Self {
            self.event.title = title.into();
            self
        }
        pub fn location(mut self, location: &str) -> Self {
            self.event.location = location.into();
            self
        }
        pub fn date(mut self, date: &str) -> Self {
            self.event.date = date.into();
            self
        }
        pub fn external_link(mut self, url: &str) -> Self {
            self.event.external_link = Some(url.parse().unwrap());
            self
        }
        pub fn category(mut self, id: u64, name: &str, slug: &str) -> Self {
            self.event.category = Some(Category {
                id: Id::new(id),
                name: name.into(),
                slug: slug.into(),
            });
            self
        }
        pub fn created_at(mut self, created_at: OffsetDateTime) -> Self {
            self.event.created_at = Some(created_at);
            self
        }
        pub fn finish(self) -> Event {
            self.event
        }
    }

    impl Builder for Event {
        type Build = EventBuild;
        fn build() -> EventBuild {
            EventBuild {
                event: Event {
                    id: Id::default(),
                    title: "".into(),
                    description: None,
                    location: "".into(),
                    date: "".into(),
                    admission: None,
                    external_link: None,
                    category: None,
                    image_url: None,
                    contact: None,
                    created_at: None,
                },
            }
        }
    }

    #[test]
    fn build_event() {
        let event = Event::build()
            .id(3)
            .title("Farmers market")
            .location("Zelný trh")
            .date("2025-06-01")
            .category(4, "Food", "food")
            .finish();
        assert_eq!(event.id, Id::new(3));
        assert_eq!(event.location, "Zelný trh");
        assert_eq!(event.category.unwrap().slug, "food");
        assert!(event.external_link.is_none());
    }
}
