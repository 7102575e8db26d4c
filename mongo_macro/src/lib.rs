extern crate proc_macro;

mod mongo_index_macro;

use proc_macro::TokenStream;

/// 为实体生成 `MongoIndexModelProvider` 实现
///
/// ```ignore
/// #[derive(MongoIndexModelProvider)]
/// #[mongo_collection("groups")]
/// #[mongo_index(fields["slug"], unique)]
/// #[mongo_index(fields["create_time", "_id"])]
/// pub struct GroupEntity { .. }
/// ```
#[proc_macro_derive(MongoIndexModelProvider, attributes(mongo_collection, mongo_index))]
pub fn mongo_index_model_provider(input: TokenStream) -> TokenStream {
    mongo_index_macro::expand_index_model_provider(input)
}
