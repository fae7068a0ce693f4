use uuid::Uuid;

/// Records with a stable identifier that derived views point back to.
pub trait Identifiable {
    fn id(&self) -> Uuid;

    fn has_id(&self, id: Uuid) -> bool {
        self.id() == id
    }
}

/// Short label for logs and list rows.
pub trait Displayable {
    fn display_label(&self) -> String;
}
