pub mod brands_sea_repo;
pub mod companies_sea_repo;
pub mod db;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod users_sea_repo;


pub use brands_sea_repo::SeaOrmBrandRepository;
pub use companies_sea_repo::SeaOrmCompanyRepository;
pub use users_sea_repo::SeaOrmUserRepository;
