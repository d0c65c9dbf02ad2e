pub mod data;
pub mod deserializer;
pub mod login;
pub mod result;
pub mod types;

use crate::responses::types::internal::InternalResult;
use crate::session::Session;

pub trait QueryResult: deserializer::QueryDeserializer + Sized {
    fn new(res: &InternalResult, rowset: Vec<Self::ReturnType>, session: &Session) -> Self;
}

pub(crate) fn get_query_detail_url(session: &Session, query_id: &str) -> String {
    let components: Vec<String> = [session.region.clone(), Some(session.account.clone())]
        .into_iter()
        .flatten()
        .collect();
    let path = components.join("/");
    format!("https://app.snowflake.com/{path}/#/compute/history/queries/{query_id}/detail")
}
