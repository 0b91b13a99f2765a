pub mod error;
pub mod product;
pub mod pvz;
pub mod reception;
pub mod user;

pub use error::{ServiceError, ServiceResult};
pub use product::ProductService;
pub use pvz::{ListQuery, PvzPage, PvzService};
pub use reception::ReceptionService;
pub use user::UserService;

use crate::auth::TokenIssuer;
use crate::database::Repositories;

#[derive(Clone)]
pub struct Services {
    pub pvz: PvzService,
    pub receptions: ReceptionService,
    pub products: ProductService,
    pub users: UserService,
}

impl Services {
    pub fn new(repos: Repositories, tokens: TokenIssuer, list_concurrency: usize) -> Self {
        let receptions = ReceptionService::new(repos.pvz.clone(), repos.receptions.clone());
        Self {
            pvz: PvzService::new(repos.pvz, repos.receptions, repos.products.clone(), list_concurrency),
            products: ProductService::new(receptions.clone(), repos.products),
            receptions,
            users: UserService::new(repos.users, tokens),
        }
    }
}
