//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Este módulo implementa el router que mapea (método, patrón) a handlers.
//!
//! ## Arquitectura
//!
//! ```text
//! Request → Router → Handler → Response
//! ```
//!
//! Un patrón es un path donde cada segmento es literal o un placeholder
//! `{nombre}`. El placeholder acepta cualquier segmento y guarda su valor
//! en los parámetros del request:
//!
//! ```text
//! patrón:  /files/{filename}
//! path:    /files/notas.txt   →  {"filename": "notas.txt"}
//! ```
//!
//! Si ninguna ruta coincide, se retorna 404 Not Found sin contenido.
//!
//! El router se construye completo antes de aceptar conexiones y después
//! solo se lee (se comparte entre threads con `Arc<Router>`).

use std::collections::HashMap;

use crate::http::{Method, Request, Response};

/// Tipo de función handler
///
/// Un handler recibe un Request (con los parámetros ya inyectados) y
/// retorna la descripción de la Response. Puede capturar estado, por eso
/// es un closure y no un `fn`.
pub type Handler = Box<dyn Fn(&Request) -> Response + Send + Sync>;

/// Segmento de un patrón de ruta
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

impl Segment {
    fn parse(raw: &str) -> Self {
        match raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(name) => Segment::Param(name.to_string()),
            None => Segment::Literal(raw.to_string()),
        }
    }
}

/// Ruta registrada
struct Route {
    method: Method,
    pattern: String,
    segments: Vec<Segment>,
    handler: Handler,
}

impl Route {
    fn new(method: Method, pattern: &str, handler: Handler) -> Self {
        Self {
            method,
            pattern: pattern.to_string(),
            segments: pattern.split('/').map(Segment::parse).collect(),
            handler,
        }
    }

    /// Nombres de los placeholders, de izquierda a derecha
    fn param_names(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Param(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Cantidad de segmentos literales antes del primer placeholder
    fn literal_prefix_len(&self) -> usize {
        self.segments
            .iter()
            .take_while(|segment| matches!(segment, Segment::Literal(_)))
            .count()
    }

    /// Compara el path segmento a segmento
    ///
    /// Retorna los parámetros capturados si coincide, `None` si no.
    fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = path.split('/').collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
            }
        }

        Some(params)
    }
}

/// Router que mapea (método, patrón) a handlers
pub struct Router {
    /// Rutas en orden de registro; (método, patrón) es único
    routes: Vec<Route>,
}

impl Router {
    /// Crea un nuevo router vacío
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Registra una ruta con su handler
    ///
    /// Registrar de nuevo el mismo (método, patrón) reemplaza el handler
    /// anterior.
    ///
    /// # Ejemplo
    /// ```
    /// use http_server::http::{Method, Request, Response};
    /// use http_server::router::Router;
    ///
    /// let mut router = Router::new();
    /// router.register(Method::GET, "/echo/{str}", |req: &Request| {
    ///     Response::text(req.param("str").unwrap_or_default())
    /// });
    /// ```
    pub fn register<F>(&mut self, method: Method, pattern: &str, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        let route = Route::new(method, pattern, Box::new(handler));
        log::debug!(
            "Ruta registrada: {} {} (params: {:?})",
            method,
            pattern,
            route.param_names()
        );

        match self
            .routes
            .iter_mut()
            .find(|existing| existing.method == method && existing.pattern == pattern)
        {
            Some(existing) => *existing = route,
            None => self.routes.push(route),
        }
    }

    /// Registra una ruta GET
    pub fn get<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.register(Method::GET, pattern, handler);
    }

    /// Registra una ruta POST
    pub fn post<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.register(Method::POST, pattern, handler);
    }

    /// Registra una ruta PUT
    pub fn put<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.register(Method::PUT, pattern, handler);
    }

    /// Registra una ruta DELETE
    pub fn delete<F>(&mut self, pattern: &str, handler: F)
    where
        F: Fn(&Request) -> Response + Send + Sync + 'static,
    {
        self.register(Method::DELETE, pattern, handler);
    }

    /// Encuentra y ejecuta el handler apropiado para un request
    ///
    /// Solo se consideran rutas con el mismo método. Si varias coinciden,
    /// gana la de prefijo literal más largo y, en empate, la registrada
    /// primero. Sin coincidencias retorna 404 Not Found.
    ///
    /// # Ejemplo
    /// ```
    /// use http_server::http::{Request, StatusCode};
    /// use http_server::router::Router;
    ///
    /// let router = Router::new();
    ///
    /// let request = Request::parse(b"GET /nada HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(router.dispatch(request).status(), StatusCode::NotFound);
    /// ```
    pub fn dispatch(&self, request: Request) -> Response {
        let mut best: Option<(&Route, HashMap<String, String>)> = None;

        for route in self.routes.iter().filter(|r| r.method == request.method()) {
            let Some(params) = route.matches(request.path()) else {
                continue;
            };

            let better = match &best {
                Some((current, _)) => route.literal_prefix_len() > current.literal_prefix_len(),
                None => true,
            };
            if better {
                best = Some((route, params));
            }
        }

        match best {
            Some((route, params)) => {
                log::debug!("{} {} → {}", request.method(), request.path(), route.pattern);
                (route.handler)(&request.with_params(params))
            }
            None => {
                log::debug!("Sin ruta para {} {}", request.method(), request.path());
                Response::not_found()
            }
        }
    }

    /// Cantidad de rutas registradas
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Verifica si no hay rutas registradas
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;

    fn request(raw: &str) -> Request {
        Request::parse(raw.as_bytes()).unwrap()
    }

    fn get(path: &str) -> Request {
        request(&format!("GET {} HTTP/1.1\r\n\r\n", path))
    }

    /// Handler que responde con los params ordenados como texto
    fn echo_params(req: &Request) -> Response {
        let mut pairs: Vec<String> = req
            .params()
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        pairs.sort();
        Response::text(&pairs.join("&"))
    }

    fn body_of(response: &Response) -> String {
        let content = response.content().expect("no content");
        String::from_utf8(content.data.clone()).unwrap()
    }

    #[test]
    fn test_router_creation() {
        let router = Router::new();
        assert!(router.is_empty());
    }

    #[test]
    fn test_register_route() {
        let mut router = Router::new();
        router.get("/test", |_req: &Request| Response::ok());

        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_register_same_key_replaces() {
        let mut router = Router::new();
        router.get("/test", |_req: &Request| Response::ok());
        router.get("/test", |_req: &Request| Response::created());
        router.post("/test", |_req: &Request| Response::ok());

        assert_eq!(router.len(), 2);
        assert_eq!(router.dispatch(get("/test")).status(), StatusCode::Created);
    }

    #[test]
    fn test_route_found() {
        let mut router = Router::new();
        router.get("/", |_req: &Request| Response::ok());

        assert_eq!(router.dispatch(get("/")).status(), StatusCode::Ok);
    }

    #[test]
    fn test_route_not_found() {
        let router = Router::new();
        let response = router.dispatch(get("/nonexistent"));

        assert_eq!(response, Response::not_found());
    }

    #[test]
    fn test_method_must_match() {
        let mut router = Router::new();
        router.get("/files/{name}", |_req: &Request| Response::ok());

        let post = request("POST /files/a HTTP/1.1\r\n\r\n");
        assert_eq!(router.dispatch(post).status(), StatusCode::NotFound);
    }

    #[test]
    fn test_all_method_shorthands() {
        let mut router = Router::new();
        router.get("/r", |_req: &Request| Response::text("get"));
        router.post("/r", |_req: &Request| Response::text("post"));
        router.put("/r", |_req: &Request| Response::text("put"));
        router.delete("/r", |_req: &Request| Response::text("delete"));

        for method in ["GET", "POST", "PUT", "DELETE"] {
            let response = router.dispatch(request(&format!("{} /r HTTP/1.1\r\n\r\n", method)));
            assert_eq!(body_of(&response), method.to_lowercase());
        }
    }

    #[test]
    fn test_single_param_extracted() {
        let mut router = Router::new();
        router.get("/echo/{str}", echo_params);

        let response = router.dispatch(get("/echo/abc123"));
        assert_eq!(body_of(&response), "str=abc123");
    }

    #[test]
    fn test_params_count_matches_placeholders() {
        let mut router = Router::new();
        router.get("/a/{x}/b/{y}/{z}", |req: &Request| {
            assert_eq!(req.params().len(), 3);
            Response::ok()
        });

        let response = router.dispatch(get("/a/1/b/2/3"));
        assert_eq!(response.status(), StatusCode::Ok);

        let mut router = Router::new();
        router.get("/a/{x}/b/{y}/{z}", echo_params);
        assert_eq!(body_of(&router.dispatch(get("/a/1/b/2/3"))), "x=1&y=2&z=3");
    }

    #[test]
    fn test_literal_route_has_no_params() {
        let mut router = Router::new();
        router.get("/user-agent", |req: &Request| {
            assert!(req.params().is_empty());
            Response::ok()
        });

        assert_eq!(router.dispatch(get("/user-agent")).status(), StatusCode::Ok);
    }

    #[test]
    fn test_segment_count_must_match() {
        let mut router = Router::new();
        router.get("/echo/{str}", echo_params);

        assert_eq!(router.dispatch(get("/echo")).status(), StatusCode::NotFound);
        assert_eq!(router.dispatch(get("/echo/a/b")).status(), StatusCode::NotFound);
        assert_eq!(router.dispatch(get("/echo/")).status(), StatusCode::Ok);
    }

    #[test]
    fn test_literals_are_case_sensitive() {
        let mut router = Router::new();
        router.get("/echo/{str}", echo_params);

        assert_eq!(router.dispatch(get("/ECHO/abc")).status(), StatusCode::NotFound);
    }

    #[test]
    fn test_root_does_not_match_empty_segment_routes() {
        let mut router = Router::new();
        router.get("/", |_req: &Request| Response::ok());

        assert_eq!(router.dispatch(get("/echo")).status(), StatusCode::NotFound);
    }

    #[test]
    fn test_longest_literal_prefix_wins() {
        let mut router = Router::new();
        router.get("/{any}/{other}", |_req: &Request| Response::text("generic"));
        router.get("/files/{name}", |_req: &Request| Response::text("files"));

        assert_eq!(body_of(&router.dispatch(get("/files/a"))), "files");
        assert_eq!(body_of(&router.dispatch(get("/other/a"))), "generic");
    }

    #[test]
    fn test_tie_goes_to_first_registered() {
        let mut router = Router::new();
        router.get("/files/{name}", |_req: &Request| Response::text("first"));
        router.get("/files/{other}", |_req: &Request| Response::text("second"));

        assert_eq!(body_of(&router.dispatch(get("/files/a"))), "first");
    }

    #[test]
    fn test_duplicate_param_name_rightmost_wins() {
        let mut router = Router::new();
        router.get("/{x}/{x}", echo_params);

        assert_eq!(body_of(&router.dispatch(get("/left/right"))), "x=right");
    }

    #[test]
    fn test_handler_can_capture_state() {
        let greeting = String::from("hola");
        let mut router = Router::new();
        router.get("/greet", move |_req: &Request| Response::text(&greeting));

        assert_eq!(body_of(&router.dispatch(get("/greet"))), "hola");
    }

    #[test]
    fn test_segment_parse() {
        assert_eq!(Segment::parse("{name}"), Segment::Param("name".to_string()));
        assert_eq!(Segment::parse("name"), Segment::Literal("name".to_string()));
        assert_eq!(Segment::parse("{name"), Segment::Literal("{name".to_string()));
        assert_eq!(Segment::parse(""), Segment::Literal(String::new()));
    }

    #[test]
    fn test_literal_prefix_len() {
        let handler: Handler = Box::new(|_req: &Request| Response::ok());
        let route = Route::new(Method::GET, "/files/{name}/raw", handler);

        // "", "files" antes del placeholder
        assert_eq!(route.literal_prefix_len(), 2);
        assert_eq!(route.param_names(), vec!["name"]);
    }
}
