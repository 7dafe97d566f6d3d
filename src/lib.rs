pub mod api_football;
pub mod config;
pub mod endpoints;
pub mod feeds;
pub mod football_data;
pub mod http_client;
pub mod json_util;
pub mod model;
pub mod provider;
pub mod proxy;
pub mod replay;
pub mod rounds;
pub mod schedule;
pub mod screen;
pub mod sportsdb;
pub mod status;
pub mod team_stats;
