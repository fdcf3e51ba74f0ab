use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Organization {
    pub id: i64,
    pub title: String,
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Job {
    pub id: i64,
    pub position_name: String,
    pub job_page_url: String,
    pub logo_url: String,
    pub labor_function: String,
    pub posted_date: i64,
    pub description: String,
    pub location: String,
    pub organization_id: i64,
    pub tags: Vec<Tag>,
}
