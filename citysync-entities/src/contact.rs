use crate::id::Id;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ContactInfo {
    pub id: Id,

    /// Postal address of the organizer
    pub address: String,

    /// A phone number to get in contact
    pub phone: String,

    /// An e-mail address to get in contact
    pub email: String,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.address.trim().is_empty()
            && self.phone.trim().is_empty()
            && self.email.trim().is_empty()
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn empty_contact() {
        assert!(ContactInfo::default().is_empty());
        let c = ContactInfo {
            email: "info@citysync.cz".into(),
            ..Default::default()
        };
        assert!(!c.is_empty());
        let c = ContactInfo {
            phone: "  ".into(),
            ..Default::default()
        };
        assert!(c.is_empty());
    }
}
