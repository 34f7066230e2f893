use super::*;
use citysync_entities as e;
use e::url::Url;

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

fn parse_url(s: Option<String>) -> Option<Url> {
    non_blank(s).and_then(|s| s.trim().parse().ok())
}

impl From<e::category::Category> for Category {
    fn from(from: e::category::Category) -> Self {
        let e::category::Category { id, name, slug } = from;
        Self {
            id: id.into(),
            name,
            slug,
        }
    }
}

impl From<Category> for e::category::Category {
    fn from(from: Category) -> Self {
        let Category { id, name, slug } = from;
        Self {
            id: id.into(),
            name,
            slug,
        }
    }
}

impl From<e::contact::ContactInfo> for ContactInfo {
    fn from(from: e::contact::ContactInfo) -> Self {
        let e::contact::ContactInfo {
            id,
            address,
            phone,
            email,
        } = from;
        Self {
            id: id.into(),
            address,
            phone,
            email,
        }
    }
}

impl From<ContactInfo> for e::contact::ContactInfo {
    fn from(from: ContactInfo) -> Self {
        let ContactInfo {
            id,
            address,
            phone,
            email,
        } = from;
        Self {
            id: id.into(),
            address,
            phone,
            email,
        }
    }
}

impl From<Event> for e::event::Event {
    fn from(from: Event) -> Self {
        let Event {
            id,
            title,
            description,
            category,
            category_name,
            category_slug,
            location,
            date,
            image_url,
            admission,
            external_links,
            contact_info_details,
            created_at,
            ..
        } = from;

        let category = match (category, category_name, category_slug) {
            (Some(id), Some(name), Some(slug)) => Some(e::category::Category {
                id: id.into(),
                name,
                slug,
            }),
            _ => None,
        };

        Self {
            id: id.into(),
            title,
            description: non_blank(Some(description)),
            location,
            date,
            admission: non_blank(admission),
            external_link: parse_url(external_links),
            category,
            image_url: parse_url(image_url),
            contact: contact_info_details
                .map(e::contact::ContactInfo::from)
                .filter(|c| !c.is_empty()),
            created_at: created_at.as_deref().and_then(e::event::parse_event_date),
        }
    }
}

impl From<e::location::ResolvedLocation> for MapMarker {
    fn from(from: e::location::ResolvedLocation) -> Self {
        let (lat, lng) = (from.lat(), from.lng());
        let e::event::Event {
            id,
            title,
            location,
            date,
            category,
            external_link,
            ..
        } = from.event;
        Self {
            id: id.into(),
            title,
            location,
            date,
            category: category.map(|c| c.name),
            external_link: external_link.map(Url::into),
            lat,
            lng,
        }
    }
}

impl From<e::geo::MapPoint> for Coordinate {
    fn from(from: e::geo::MapPoint) -> Self {
        let (lat, lng) = from.to_lat_lng_deg();
        Self { lat, lng }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn backend_event() -> Event {
        Event {
            id: 7,
            title: "Farmers market".into(),
            description: " ".into(),
            category: Some(4),
            category_name: Some("Food".into()),
            category_slug: Some("food".into()),
            location: "Zelný trh".into(),
            date: "2025-06-01".into(),
            image: None,
            image_url: Some("http://127.0.0.1:8000/media/events/market.jpg".into()),
            admission: Some("Free admission".into()),
            external_links: Some("".into()),
            contact_info: Some(2),
            contact_info_details: Some(ContactInfo {
                id: 2,
                address: "Zelný trh 1, Brno".into(),
                phone: "+420 123 456 789".into(),
                email: "market@example.cz".into(),
            }),
            created_at: Some("2025-05-20T08:15:00.123456Z".into()),
        }
    }

    #[test]
    fn convert_backend_event_into_entity() {
        let event = e::event::Event::from(backend_event());
        assert_eq!(event.id, e::id::Id::new(7));
        assert_eq!(event.description, None);
        assert_eq!(event.admission.as_deref(), Some("Free admission"));
        assert_eq!(event.external_link, None);
        assert_eq!(event.category.as_ref().unwrap().slug, "food");
        assert_eq!(
            event.image_url.unwrap().as_str(),
            "http://127.0.0.1:8000/media/events/market.jpg"
        );
        assert_eq!(event.contact.unwrap().phone, "+420 123 456 789");
        assert!(event.created_at.is_some());
    }

    #[test]
    fn ignore_invalid_links() {
        let mut ev = backend_event();
        ev.external_links = Some("not a url".into());
        assert_eq!(e::event::Event::from(ev).external_link, None);

        let mut ev = backend_event();
        ev.external_links = Some("https://www.gotobrno.cz/".into());
        assert_eq!(
            e::event::Event::from(ev).external_link.unwrap().as_str(),
            "https://www.gotobrno.cz/"
        );
    }

    #[test]
    fn drop_empty_contact_details() {
        let mut ev = backend_event();
        ev.contact_info_details = Some(ContactInfo {
            id: 3,
            address: "".into(),
            phone: " ".into(),
            email: "".into(),
        });
        assert!(e::event::Event::from(ev).contact.is_none());
    }

    #[test]
    fn incomplete_category_is_dropped() {
        let mut ev = backend_event();
        ev.category_slug = None;
        assert!(e::event::Event::from(ev).category.is_none());
    }

    #[test]
    fn convert_category_and_contact_entities() {
        let category = Category::from(e::category::Category {
            id: e::id::Id::new(4),
            name: "Food".into(),
            slug: "food".into(),
        });
        assert_eq!(
            category,
            Category {
                id: 4,
                name: "Food".into(),
                slug: "food".into(),
            }
        );
        let contact = ContactInfo::from(e::contact::ContactInfo::from(
            backend_event().contact_info_details.unwrap(),
        ));
        assert_eq!(contact.id, 2);
        assert_eq!(contact.email, "market@example.cz");
    }

    #[test]
    fn convert_resolved_location_into_marker() {
        let mut ev = backend_event();
        ev.external_links = Some("https://www.gotobrno.cz/".into());
        let resolved = e::location::ResolvedLocation {
            event: ev.into(),
            pos: e::geo::MapPoint::try_from_lat_lng_deg(49.1919, 16.6079).unwrap(),
        };
        let marker = MapMarker::from(resolved);
        assert_eq!(marker.id, 7);
        assert_eq!(marker.category.as_deref(), Some("Food"));
        assert_eq!(marker.external_link.as_deref(), Some("https://www.gotobrno.cz/"));
        assert_eq!((marker.lat, marker.lng), (49.1919, 16.6079));
    }
}
