pub mod folder_scanner;
pub mod http;
pub mod m3u_parser;
pub mod playlist_fetcher;
pub mod resolver;
pub mod stalker;
pub mod upload_store;
pub mod xtream;
