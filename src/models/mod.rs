pub mod booking;
pub mod event;
pub mod layout;
pub mod review;
pub mod user;

pub use booking::{BookingRecord, BookingRequest, CheckoutSession, CheckoutSessionRequest, TicketRequest};
pub use event::{expand_layout_sections, Event, EventPayload, EventSection, SectionPayload};
pub use layout::{AdvancedLayout, GridCell, LayoutConfig, LegacySection, NewLayout, StoredLayout, Tier};
pub use review::{Review, ReviewRequest};
pub use user::{AuthResponse, LoginRequest, OtpLoginRequest, OtpRequest, RegisterRequest};
