//! App Router

use salvo::Router;

use crate::{auth, outpasses};

/// Routes that need no session.
pub fn public_router() -> Router {
    Router::with_path("auth/login").post(auth::login::handler)
}

/// Routes behind the bearer token middleware.
pub fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(Router::with_path("auth/me").get(auth::me::handler))
        .push(
            Router::with_path("outpasses")
                .get(outpasses::index::handler)
                .post(outpasses::apply::handler)
                .push(Router::with_path("history").get(outpasses::history::handler))
                .push(Router::with_path("dashboard").get(outpasses::dashboard::handler))
                .push(Router::with_path("verify").get(outpasses::verify::handler))
                .push(
                    Router::with_path("{outpass}")
                        .get(outpasses::get::handler)
                        .delete(outpasses::cancel::handler)
                        .push(Router::with_path("status").put(outpasses::decide::handler))
                        .push(Router::with_path("out-status").put(outpasses::out_status::handler))
                        .push(
                            Router::with_path("documents/{index}")
                                .get(outpasses::document::handler),
                        ),
                ),
        )
}
