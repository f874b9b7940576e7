use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, Object, Result, Schema, ID,
};

use crate::{
    model::{wire_timestamp, Caller, Todo},
    service::TodoService,
};

pub type TodoSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

// Build the executable schema; the caller is attached per request
pub fn build_schema(service: TodoService) -> TodoSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(service)
        .finish()
}

#[Object]
impl Todo {
    async fn id(&self) -> ID {
        ID(self.id.clone())
    }

    async fn user_id(&self) -> &str {
        &self.user_id
    }

    async fn title(&self) -> &str {
        &self.title
    }

    async fn done(&self) -> bool {
        self.done
    }

    async fn created_at(&self) -> String {
        wire_timestamp(self.created_at)
    }

    async fn updated_at(&self) -> String {
        wire_timestamp(self.updated_at)
    }
}

pub struct QueryRoot;

#[Object]
impl QueryRoot {
    async fn todos(&self, ctx: &Context<'_>) -> Result<Vec<Todo>> {
        let (service, caller) = scope(ctx)?;
        service.list(caller).await.map_err(|e| e.extend())
    }
}

pub struct MutationRoot;

#[Object]
impl MutationRoot {
    async fn add_todo(&self, ctx: &Context<'_>, title: String) -> Result<Todo> {
        let (service, caller) = scope(ctx)?;
        service.create(caller, &title).await.map_err(|e| e.extend())
    }

    async fn toggle_todo(&self, ctx: &Context<'_>, id: ID) -> Result<Todo> {
        let (service, caller) = scope(ctx)?;
        service.toggle(caller, &id).await.map_err(|e| e.extend())
    }

    async fn delete_todo(&self, ctx: &Context<'_>, id: ID) -> Result<bool> {
        let (service, caller) = scope(ctx)?;
        service.delete(caller, &id).await.map_err(|e| e.extend())
    }
}

fn scope<'a>(ctx: &Context<'a>) -> Result<(&'a TodoService, &'a Caller)> {
    Ok((ctx.data::<TodoService>()?, ctx.data::<Caller>()?))
}
