//! Tabbed navigation
//!
//! A [`TabRouter`] composes one independent [`Router`] per tab and tracks
//! which tab is selected. Deep links are reconciled across all tabs: an
//! explicit tab wins, then a tab that already shows the path, then the
//! selected tab.

use std::fmt;
use tokio::sync::watch;

use waypoint_core::{Deeplink, Destination, RouteInfo, TabConfig};

use crate::observe::ChangeNotifier;
use crate::router::Router;

/// Router for a tabbed surface
pub struct TabRouter<R> {
    tabs: Vec<Router<R>>,
    selected_tab: usize,
    notifier: ChangeNotifier,
}

impl<R: RouteInfo> TabRouter<R> {
    /// Create a tab router over existing routers, selecting the first tab
    pub fn new(tabs: Vec<Router<R>>) -> Self {
        Self {
            tabs,
            selected_tab: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    /// Create `config.tab_count` root routers sharing `config.router`
    pub fn from_config(config: &TabConfig) -> Self {
        let tabs = (0..config.tab_count)
            .map(|_| Router::with_config(config.router.clone()))
            .collect();
        let mut tab_router = Self::new(tabs);
        tab_router.selected_tab = config.initial_tab;
        tab_router
    }

    /// All tab routers in order
    pub fn tabs(&self) -> &[Router<R>] {
        &self.tabs
    }

    /// Router for a tab, if it exists
    pub fn tab(&self, index: usize) -> Option<&Router<R>> {
        self.tabs.get(index)
    }

    /// Selected tab index
    pub fn selected_tab(&self) -> usize {
        self.selected_tab
    }

    /// Router of the selected tab
    ///
    /// `None` when the selection is out of range. That is an ordinary state,
    /// not an error: operations that need the current router skip silently.
    pub fn current_router(&self) -> Option<&Router<R>> {
        self.tabs.get(self.selected_tab)
    }

    /// Select a tab
    pub fn select_tab(&mut self, tab: usize) {
        if tab >= self.tabs.len() {
            tracing::debug!(tab, tabs = self.tabs.len(), "Selected tab has no router");
        }
        self.selected_tab = tab;
        self.notifier.notify("select_tab");
    }

    /// Subscribe to tab selection changes
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notifier.subscribe()
    }

    /// Reconcile a deep link with every tab
    ///
    /// 1. If the first route names a tab, select it and replace that tab's
    ///    stack with the remaining routes.
    /// 2. Otherwise the first tab whose current path contains `path_string` is
    ///    selected and trimmed back to the chain.
    /// 3. Otherwise the chain is pushed onto the selected tab.
    pub fn handle_deeplink(&mut self, routes: Vec<Destination<R>>, path_string: &str) {
        if let Some(tab) = routes.first().and_then(|route| route.tab_index()) {
            tracing::debug!(tab, "Deep link names a tab");
            self.select_tab(tab);
            let rest = routes.into_iter().skip(1).collect();
            if let Some(router) = self.current_router() {
                router.push_replacement(rest);
            }
            return;
        }

        if let Some(tab) = self
            .tabs
            .iter()
            .position(|router| router.is_path_present(path_string))
        {
            tracing::debug!(tab, path = path_string, "Deep link path already open");
            self.select_tab(tab);
            self.tabs[tab].handle_deeplink(routes, true);
            return;
        }

        if let Some(router) = self.current_router() {
            router.handle_deeplink(routes, false);
        }
    }

    /// Reconcile a parsed deep link
    pub fn open_deeplink(&mut self, deeplink: Deeplink<R>) {
        self.handle_deeplink(deeplink.routes, &deeplink.path);
    }

    /// Select the first tab and pop it to its root
    pub fn route_to_home(&mut self) {
        self.select_tab(0);
        if let Some(router) = self.current_router() {
            router.pop_to_root();
        }
    }
}

impl<R: RouteInfo> fmt::Debug for TabRouter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TabRouter")
            .field("selected_tab", &self.selected_tab)
            .field("tabs", &self.tabs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::RouterConfig;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    enum Route {
        Tab(usize),
        Home,
        Inbox,
        Thread(u32),
        X,
    }

    impl RouteInfo for Route {
        fn path(&self) -> String {
            match self {
                Route::Tab(index) => format!("/tab{}", index),
                Route::Home => "home".to_string(),
                Route::Inbox => "/inbox".to_string(),
                Route::Thread(id) => format!("/thread{}", id),
                Route::X => "x".to_string(),
            }
        }

        fn tab_index(&self) -> Option<usize> {
            match self {
                Route::Tab(index) => Some(*index),
                _ => None,
            }
        }
    }

    fn push(route: Route) -> Destination<Route> {
        Destination::push(route)
    }

    fn routes(router: &Router<Route>) -> Vec<Route> {
        router.snapshot().stack
    }

    fn two_tabs() -> TabRouter<Route> {
        TabRouter::new(vec![Router::new(), Router::new()])
    }

    #[test]
    fn test_current_router_follows_selection() {
        let mut tabs = two_tabs();
        assert!(tabs.current_router().unwrap().ptr_eq(&tabs.tabs()[0]));

        tabs.select_tab(1);
        assert!(tabs.current_router().unwrap().ptr_eq(&tabs.tabs()[1]));
    }

    #[test]
    fn test_out_of_range_selection_has_no_router() {
        let mut tabs = two_tabs();
        tabs.select_tab(5);
        assert_eq!(tabs.selected_tab(), 5);
        assert!(tabs.current_router().is_none());

        // Skipped silently
        tabs.handle_deeplink(vec![push(Route::X)], "x");
        assert!(tabs.tabs().iter().all(|router| router.stack().is_empty()));
    }

    #[test]
    fn test_deeplink_with_tab_index_replaces_stack() {
        let mut tabs = two_tabs();
        tabs.tabs()[1].route_to(push(Route::Home));

        tabs.handle_deeplink(
            vec![push(Route::Tab(1)), push(Route::Inbox), push(Route::Thread(7))],
            "/tab1/inbox/thread7",
        );

        assert_eq!(tabs.selected_tab(), 1);
        assert_eq!(routes(&tabs.tabs()[1]), vec![Route::Inbox, Route::Thread(7)]);
        assert!(tabs.tabs()[0].stack().is_empty());
    }

    #[test]
    fn test_deeplink_with_only_tab_index_pops_to_root() {
        let mut tabs = two_tabs();
        tabs.tabs()[1].route_to(push(Route::Inbox));

        tabs.handle_deeplink(vec![push(Route::Tab(1))], "/tab1");
        assert_eq!(tabs.selected_tab(), 1);
        assert!(tabs.tabs()[1].stack().is_empty());
    }

    #[test]
    fn test_deeplink_trims_tab_that_has_path() {
        let mut tabs = two_tabs();
        let inbox = &tabs.tabs()[1];
        inbox.route_to(push(Route::Inbox));
        inbox.route_to(push(Route::Thread(1)));
        inbox.route_to(push(Route::Thread(2)));

        tabs.handle_deeplink(
            vec![push(Route::Inbox), push(Route::Thread(1))],
            "/inbox/thread1",
        );

        assert_eq!(tabs.selected_tab(), 1);
        assert_eq!(
            routes(&tabs.tabs()[1]),
            vec![Route::Inbox, Route::Thread(1)]
        );
    }

    #[test]
    fn test_first_matching_tab_wins() {
        let mut tabs = TabRouter::new(vec![Router::new(), Router::new(), Router::new()]);
        tabs.tabs()[1].route_to(push(Route::Inbox));
        tabs.tabs()[2].route_to(push(Route::Inbox));
        tabs.tabs()[2].route_to(push(Route::Thread(3)));

        tabs.handle_deeplink(vec![push(Route::Inbox)], "/inbox");

        assert_eq!(tabs.selected_tab(), 1);
        assert_eq!(
            routes(&tabs.tabs()[2]),
            vec![Route::Inbox, Route::Thread(3)]
        );
    }

    #[test]
    fn test_deeplink_falls_back_to_selected_tab() {
        let mut tabs = two_tabs();
        tabs.tabs()[0].route_to(push(Route::Home));

        tabs.handle_deeplink(vec![push(Route::X)], "x");

        assert_eq!(tabs.selected_tab(), 0);
        assert_eq!(routes(&tabs.tabs()[0]), vec![Route::Home, Route::X]);
        assert!(tabs.tabs()[1].stack().is_empty());
    }

    #[test]
    fn test_empty_path_falls_through_to_selected_tab() {
        let mut tabs = two_tabs();
        tabs.tabs()[0].route_to(push(Route::Home));
        tabs.select_tab(1);

        // An empty path string is not treated as present in tab 0
        tabs.handle_deeplink(vec![push(Route::X)], "");

        assert_eq!(tabs.selected_tab(), 1);
        assert_eq!(routes(&tabs.tabs()[0]), vec![Route::Home]);
        assert_eq!(routes(&tabs.tabs()[1]), vec![Route::X]);
    }

    #[test]
    fn test_debug_shows_selection() {
        let tabs = two_tabs();
        assert!(format!("{:?}", tabs).starts_with("TabRouter { selected_tab: 0"));
    }

    #[test]
    fn test_route_to_home() {
        let mut tabs = two_tabs();
        tabs.tabs()[0].route_to(push(Route::Inbox));
        tabs.tabs()[1].route_to(push(Route::Inbox));
        tabs.select_tab(1);

        tabs.route_to_home();

        assert_eq!(tabs.selected_tab(), 0);
        assert!(tabs.tabs()[0].stack().is_empty());
        assert_eq!(routes(&tabs.tabs()[1]), vec![Route::Inbox]);
    }

    #[test]
    fn test_from_config() {
        let config = TabConfig::new(3)
            .initial_tab(2)
            .router(RouterConfig::default().max_redirect_depth(4));
        let tabs: TabRouter<Route> = TabRouter::from_config(&config);

        assert_eq!(tabs.tabs().len(), 3);
        assert_eq!(tabs.selected_tab(), 2);
        assert!(tabs
            .tabs()
            .iter()
            .all(|router| router.config().max_redirect_depth == 4));
    }

    #[test]
    fn test_selection_notifies() {
        let mut tabs = two_tabs();
        let rx = tabs.subscribe();
        tabs.select_tab(1);
        assert!(rx.has_changed().unwrap());
    }

    #[test]
    fn test_tab_lookup() {
        let tabs = two_tabs();
        assert!(tabs.tab(1).is_some());
        assert!(tabs.tab(2).is_none());
    }
}
