pub mod agent_pack;
pub mod audit;
pub mod coach;
pub mod init;
pub mod roadmap;
pub mod ship;
pub mod studio;
