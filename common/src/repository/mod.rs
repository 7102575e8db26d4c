pub mod db;
pub mod index_trait;
pub mod repository_util;
