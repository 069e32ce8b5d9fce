pub mod lru_map;
