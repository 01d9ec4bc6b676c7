pub mod datastore;
pub mod summarizer;
