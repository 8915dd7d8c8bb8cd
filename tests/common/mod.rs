#![allow(dead_code)]

pub mod fixtures {
    use docsite::builder::RouteTableBuilder;
    use docsite::config::RoutingConfig;
    use docsite::route::{SiteArtifact, SourceType};
    use docsite::runtime::{
        ContentFetcher, EventKind, FetchError, HtmlBuffer, MiniJinjaPartials, Router, RouterEvent,
    };
    use std::cell::RefCell;
    use std::collections::{BTreeMap, HashMap};
    use std::rc::Rc;

    /// Fetcher serving fragments from memory.
    #[derive(Default)]
    pub struct MemoryFetcher {
        pub fragments: HashMap<String, String>,
    }

    impl ContentFetcher for MemoryFetcher {
        fn fetch(&mut self, content_path: &str) -> Result<String, FetchError> {
            self.fragments
                .get(content_path)
                .cloned()
                .ok_or_else(|| FetchError::not_found(content_path))
        }
    }

    pub type TestRouter = Router<MiniJinjaPartials, HtmlBuffer, MemoryFetcher>;

    /// Artifact with one route per unit, in order.
    pub fn artifact(config: &RoutingConfig, units: &[(&str, SourceType)]) -> SiteArtifact {
        let mut builder = RouteTableBuilder::new(config.clone());
        for (name, source_type) in units {
            builder.add_route(name, *source_type).unwrap();
        }
        let (routes, _) = builder.finish();
        SiteArtifact::new("Docs".to_string(), config.clone(), routes, BTreeMap::new())
    }

    /// Router whose fetcher has a fragment for every content route.
    pub fn router(artifact: SiteArtifact) -> TestRouter {
        let mut fetcher = MemoryFetcher::default();
        for route in artifact.routes.iter() {
            if let Some(path) = &route.content_path {
                fetcher
                    .fragments
                    .insert(path.clone(), format!("<p>{}</p>", route.name));
            }
        }
        Router::new(artifact, MiniJinjaPartials::new(), HtmlBuffer::new(), fetcher)
    }

    /// Record render events as route ids (`None` for the not-found view).
    pub fn record_renders(router: &mut TestRouter) -> Rc<RefCell<Vec<Option<String>>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        router.on(EventKind::Render, move |event| {
            if let RouterEvent::Render(route) = event {
                sink.borrow_mut().push(route.as_ref().map(|r| r.id.clone()));
            }
        });
        log
    }
}
