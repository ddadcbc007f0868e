pub mod api;
pub mod app_state;
pub mod routes;

pub use api::{
    create_member_request::CreateMemberRequest,
    member_response::{MemberResponse, MemberSummary},
    members::{
        active_member_count, create_member, delete_member, get_member, get_member_by_username,
        health, list_all_members, list_members, list_members_by_status, search_members,
        update_member,
    },
    update_member_request::UpdateMemberRequest,
};
pub use app_state::AppState;
pub use routes::build_router;
