/// A hobby club shown on the clubs screen. Read-only after seeding.
#[derive(Debug, Clone)]
pub struct Club {
    pub id: String,
    pub name: String,
    pub description: String,
    pub member_count: u32,
    pub category: String,
    pub image_url: String,
}
