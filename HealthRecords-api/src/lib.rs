// Health Records API
//
// HTTP layer of the Health Records service: routing, handlers,
// request/response entities and the OpenAPI document.

// Public modules
pub mod api;
pub mod entities;
pub mod openapi;
