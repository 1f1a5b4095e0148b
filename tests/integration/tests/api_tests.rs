//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::Value;

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["checks"]["database"], "healthy");
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    assert_eq!(auth.user.username, request.username);
    assert_eq!(auth.user.display_name.as_deref(), Some(request.username.as_str()));
    assert_eq!(auth.token_type, "Bearer");
    assert!(auth.expires_in > 0);
    assert!(!auth.access_token.is_empty());
    assert!(!auth.refresh_token.is_empty());
    assert_eq!(auth.user.followers_count, 0);
}

#[tokio::test]
async fn test_register_duplicates() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/auth/register", &request).await.unwrap();

    // Same username, new email
    let mut same_username = RegisterRequest::unique();
    same_username.username = request.username.clone();
    let response = server.post("/auth/register", &same_username).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "USERNAME_ALREADY_EXISTS");

    // Same email, new username
    let mut same_email = RegisterRequest::unique();
    same_email.email = request.email.clone();
    let response = server.post("/auth/register", &same_email).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "EMAIL_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.password = "short".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_register_checks_trimmed_username() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut request = RegisterRequest::unique();
    request.username = "  ab  ".to_string();

    let response = server.post("/auth/register", &request).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "VALIDATION_ERROR");

    let mut padded = RegisterRequest::unique();
    let bare = padded.username.clone();
    padded.username = format!("  {bare} ");
    let response = server.post("/auth/register", &padded).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.user.username, bare);
}

#[tokio::test]
async fn test_login_with_mixed_case_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mut register_req = RegisterRequest::unique();
    register_req.email = format!("Mixed{}@Example.com", unique_suffix());
    let response = server.post("/auth/register", &register_req).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post("/auth/login", &LoginRequest::by_email(&register_req))
        .await
        .unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(auth.user.username, register_req.username);

    let lowered = LoginRequest {
        login: register_req.email.to_lowercase(),
        password: register_req.password.clone(),
    };
    let response = server.post("/auth/login", &lowered).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_login_by_username_and_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/auth/register", &register_req).await.unwrap();

    for login_req in [
        LoginRequest::by_username(&register_req),
        LoginRequest::by_email(&register_req),
    ] {
        let response = server.post("/auth/login", &login_req).await.unwrap();
        let auth: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(auth.user.username, register_req.username);
    }
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let register_req = RegisterRequest::unique();
    server.post("/auth/register", &register_req).await.unwrap();

    let wrong_password = LoginRequest {
        login: register_req.username.clone(),
        password: "wrongpass".to_string(),
    };
    let response = server.post("/auth/login", &wrong_password).await.unwrap();
    let code = assert_error(response, StatusCode::UNAUTHORIZED).await.unwrap();
    assert_eq!(code, "INVALID_CREDENTIALS");

    let unknown_user = LoginRequest {
        login: "nobody@example.com".to_string(),
        password: "password1".to_string(),
    };
    let response = server.post("/auth/login", &unknown_user).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_refresh_me_and_logout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let refresh = RefreshRequest {
        refresh_token: auth.refresh_token.clone(),
    };
    let response = server.post("/auth/refresh", &refresh).await.unwrap();
    let refreshed: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(refreshed.user.id, auth.user.id);

    // An access token is not a refresh token
    let wrong_kind = RefreshRequest {
        refresh_token: auth.access_token.clone(),
    };
    let response = server.post("/auth/refresh", &wrong_kind).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get_auth("/auth/me", &refreshed.access_token).await.unwrap();
    let me: UserPublic = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.id, auth.user.id);

    let response = server
        .post_empty_auth("/auth/logout", &auth.access_token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["message"], "logged out successfully");
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_profile_update_and_lookup() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let update = UpdateProfileRequest {
        bio: Some("Rustacean".to_string()),
        ..Default::default()
    };
    let response = server
        .put_auth("/users/profile", &auth.access_token, &update)
        .await
        .unwrap();
    let profile: UserPublic = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(profile.bio.as_deref(), Some("Rustacean"));

    let response = server
        .put_auth("/users/profile", &auth.access_token, &UpdateProfileRequest::default())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .get(&format!("/users/username/{}", auth.user.username))
        .await
        .unwrap();
    let by_name: UserPublic = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(by_name.id, auth.user.id);

    let response = server.get("/users/999999999999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Post Tests
// ============================================================================

#[tokio::test]
async fn test_post_content_limit() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let too_long = CreatePostRequest::original("a".repeat(281));
    let response = server
        .post_auth("/posts", &auth.access_token, &too_long)
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CONTENT_TOO_LONG");

    let at_limit = CreatePostRequest::original("a".repeat(280));
    let response = server
        .post_auth("/posts", &auth.access_token, &at_limit)
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_post_type_and_references_validated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let mut bad_type = CreatePostRequest::original("hello");
    bad_type.post_type = "story".to_string();
    let response = server
        .post_auth("/posts", &auth.access_token, &bad_type)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let mut missing_parent = CreatePostRequest::original("hello");
    missing_parent.post_type = "reply".to_string();
    let response = server
        .post_auth("/posts", &auth.access_token, &missing_parent)
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let unknown_original = CreatePostRequest::repost("999999999999");
    let response = server
        .post_auth("/posts", &auth.access_token, &unknown_original)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_post_edit_and_delete_ownership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_user().await.unwrap();
    let other = server.register_user().await.unwrap();

    let response = server
        .post_auth("/posts", &author.access_token, &CreatePostRequest::original("first"))
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let path = format!("/posts/{}", post.id);

    let response = server
        .put_auth(&path, &other.access_token, &ContentRequest::new("hijacked"))
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server
        .put_auth(&path, &author.access_token, &ContentRequest::new("edited #rust"))
        .await
        .unwrap();
    let edited: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "edited #rust");

    let response = server.delete_auth(&path, &other.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&path, &author.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_reply_counter_follows_create_and_delete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let response = server
        .post_auth("/posts", &auth.access_token, &CreatePostRequest::original("parent"))
        .await
        .unwrap();
    let parent: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            "/posts",
            &auth.access_token,
            &CreatePostRequest::reply("child", &parent.id),
        )
        .await
        .unwrap();
    let reply: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.parent_post_id.as_deref(), Some(parent.id.as_str()));

    let response = server.get(&format!("/posts/{}", parent.id)).await.unwrap();
    let parent_now: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(parent_now.comments_count, parent.comments_count + 1);

    let response = server
        .get(&format!("/posts/{}/replies", parent.id))
        .await
        .unwrap();
    let replies: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(replies.contains(&reply.id));

    server
        .delete_auth(&format!("/posts/{}", reply.id), &auth.access_token)
        .await
        .unwrap();

    let response = server.get(&format!("/posts/{}", parent.id)).await.unwrap();
    let parent_after: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(parent_after.comments_count, parent.comments_count);
}

#[tokio::test]
async fn test_repost_counter_and_viewer_flag() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_user().await.unwrap();
    let fan = server.register_user().await.unwrap();

    let response = server
        .post_auth("/posts", &author.access_token, &CreatePostRequest::original("share me"))
        .await
        .unwrap();
    let original: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth("/posts", &fan.access_token, &CreatePostRequest::repost(&original.id))
        .await
        .unwrap();
    let repost: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(repost.post_type, "repost");

    let response = server
        .get_auth(&format!("/posts/{}", original.id), &fan.access_token)
        .await
        .unwrap();
    let seen_by_fan: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(seen_by_fan.reposts_count, 1);
    assert!(seen_by_fan.is_reposted);

    let response = server.get(&format!("/posts/{}", original.id)).await.unwrap();
    let anonymous: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!anonymous.is_reposted);
    assert!(!anonymous.is_liked);

    let response = server
        .post_auth(
            "/posts",
            &fan.access_token,
            &CreatePostRequest::quote("so true", &original.id),
        )
        .await
        .unwrap();
    let quote: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(quote.original_post_id.as_deref(), Some(original.id.as_str()));
}

// ============================================================================
// Like Tests
// ============================================================================

#[tokio::test]
async fn test_like_twice_then_unlike() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_user().await.unwrap();
    let fan = server.register_user().await.unwrap();

    let response = server
        .post_auth("/posts", &author.access_token, &CreatePostRequest::original("like me"))
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    let like_path = format!("/posts/{}/like", post.id);

    let response = server.post_empty_auth(&like_path, &fan.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_empty_auth(&like_path, &fan.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_LIKED");

    let response = server
        .get_auth(&format!("/posts/{}", post.id), &fan.access_token)
        .await
        .unwrap();
    let liked: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(liked.likes_count, 1);
    assert!(liked.is_liked);

    let response = server.get(&format!("/posts/{}/likes", post.id)).await.unwrap();
    let likers: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(likers.total, 1);
    assert_eq!(likers.users[0].id, fan.user.id);

    let response = server.delete_auth(&like_path, &fan.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.delete_auth(&like_path, &fan.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(&format!("/posts/{}/like-status", post.id), &fan.access_token)
        .await
        .unwrap();
    let status: LikeStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!status.is_liked);

    let response = server.get(&format!("/posts/{}", post.id)).await.unwrap();
    let restored: PostResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(restored.likes_count, 0);
}

#[tokio::test]
async fn test_like_missing_post() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let response = server
        .post_empty_auth("/posts/999999999999/like", &auth.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Follow Tests
// ============================================================================

#[tokio::test]
async fn test_follow_rules() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.register_user().await.unwrap();
    let bob = server.register_user().await.unwrap();

    let self_path = format!("/users/{}/follow", alice.user.id);
    let response = server.post_empty_auth(&self_path, &alice.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "CANNOT_FOLLOW_SELF");

    let bob_path = format!("/users/{}/follow", bob.user.id);
    let response = server.delete_auth(&bob_path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server.post_empty_auth(&bob_path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.post_empty_auth(&bob_path, &alice.access_token).await.unwrap();
    let code = assert_error(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(code, "ALREADY_FOLLOWING");

    let response = server
        .get_auth(
            &format!("/users/{}/follow-status", bob.user.id),
            &alice.access_token,
        )
        .await
        .unwrap();
    let status: FollowStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.is_following);

    let response = server
        .get(&format!("/users/{}/follow-counts", bob.user.id))
        .await
        .unwrap();
    let counts: FollowCountsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts.followers_count, 1);
    assert_eq!(counts.following_count, 0);

    let response = server
        .get(&format!("/users/{}/followers", bob.user.id))
        .await
        .unwrap();
    let followers: FollowersResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(followers.total, 1);
    assert_eq!(followers.followers[0].id, alice.user.id);

    let response = server.delete_auth(&bob_path, &alice.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_suggested_users_exclude_followed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.register_user().await.unwrap();
    let bob = server.register_user().await.unwrap();

    server
        .post_empty_auth(&format!("/users/{}/follow", bob.user.id), &alice.access_token)
        .await
        .unwrap();

    let response = server
        .get_auth("/users/suggested?limit=50", &alice.access_token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<&str> = body["users"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|u| u["id"].as_str())
        .collect();
    assert!(!ids.contains(&alice.user.id.as_str()));
    assert!(!ids.contains(&bob.user.id.as_str()));
    assert_eq!(body["limit"], 50);
}

// ============================================================================
// Timeline Tests
// ============================================================================

#[tokio::test]
async fn test_home_timeline_membership() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.register_user().await.unwrap();
    let bob = server.register_user().await.unwrap();
    let carol = server.register_user().await.unwrap();

    server
        .post_empty_auth(&format!("/users/{}/follow", bob.user.id), &alice.access_token)
        .await
        .unwrap();

    let mut ids = Vec::new();
    for (auth, content) in [(&alice, "mine"), (&bob, "followed"), (&carol, "stranger")] {
        let response = server
            .post_auth("/posts", &auth.access_token, &CreatePostRequest::original(content))
            .await
            .unwrap();
        let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
        ids.push(post.id);
    }

    let response = server
        .get_auth("/timeline/home", &alice.access_token)
        .await
        .unwrap();
    let home: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(home.contains(&ids[0]));
    assert!(home.contains(&ids[1]));
    assert!(!home.contains(&ids[2]));
    assert_eq!(home.limit, 20);
    assert_eq!(home.offset, 0);

    // Newest first
    let positions: Vec<usize> = ids[..2]
        .iter()
        .filter_map(|id| home.posts.iter().position(|p| &p.id == id))
        .collect();
    assert!(positions[1] < positions[0]);

    let response = server.get("/timeline/home").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server.get("/timeline/explore?limit=100").await.unwrap();
    let explore: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(explore.contains(&ids[2]));
}

#[tokio::test]
async fn test_drafts_hidden_from_feeds() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let response = server
        .post_auth(
            "/posts",
            &auth.access_token,
            &CreatePostRequest::original("work in progress").draft(),
        )
        .await
        .unwrap();
    let draft: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get_auth("/timeline/home", &auth.access_token)
        .await
        .unwrap();
    let home: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!home.contains(&draft.id));
    assert_eq!(home.total, 0);

    let response = server.get("/timeline/explore?limit=100").await.unwrap();
    let explore: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!explore.contains(&draft.id));

    let response = server
        .get(&format!("/users/{}/posts", auth.user.id))
        .await
        .unwrap();
    let own: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(own.total, 0);
}

#[tokio::test]
async fn test_trending_is_readable_anonymously() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/timeline/trending?limit=5").await.unwrap();
    let trending: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(trending.limit, 5);
    assert!(trending.posts.len() <= 5);
}

// ============================================================================
// Comment Tests
// ============================================================================

#[tokio::test]
async fn test_comment_thread() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_user().await.unwrap();
    let commenter = server.register_user().await.unwrap();

    let response = server
        .post_auth("/posts", &author.access_token, &CreatePostRequest::original("discuss"))
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .post_auth(
            &format!("/posts/{}/comments", post.id),
            &commenter.access_token,
            &ContentRequest::new("first!"),
        )
        .await
        .unwrap();
    let comment: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(comment.post_id, post.id);
    assert!(comment.parent_id.is_none());

    let response = server
        .post_auth(
            &format!("/comments/{}/replies", comment.id),
            &author.access_token,
            &ContentRequest::new("thanks"),
        )
        .await
        .unwrap();
    let reply: CommentResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(reply.post_id, post.id);
    assert_eq!(reply.parent_id.as_deref(), Some(comment.id.as_str()));

    let response = server
        .get(&format!("/posts/{}/comments", post.id))
        .await
        .unwrap();
    let comments: CommentListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(comments.total, 1);
    assert_eq!(comments.comments[0].id, comment.id);

    let response = server
        .get(&format!("/comments/{}/replies", comment.id))
        .await
        .unwrap();
    let replies: ReplyListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(replies.total, 1);
    assert_eq!(replies.replies[0].id, reply.id);

    // An original post is not a comment
    let response = server
        .post_auth(
            &format!("/comments/{}/replies", post.id),
            &author.access_token,
            &ContentRequest::new("nope"),
        )
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(code, "UNKNOWN_COMMENT");

    let response = server
        .put_auth(
            &format!("/comments/{}", comment.id),
            &commenter.access_token,
            &ContentRequest::new("first! (edited)"),
        )
        .await
        .unwrap();
    let edited: CommentResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(edited.content, "first! (edited)");

    let response = server
        .delete_auth(&format!("/comments/{}", comment.id), &author.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}

// ============================================================================
// Notification Tests
// ============================================================================

#[tokio::test]
async fn test_follow_notification_is_deduplicated() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let alice = server.register_user().await.unwrap();
    let bob = server.register_user().await.unwrap();
    let follow_path = format!("/users/{}/follow", bob.user.id);

    // Follow, unfollow, follow again
    server.post_empty_auth(&follow_path, &alice.access_token).await.unwrap();
    server.delete_auth(&follow_path, &alice.access_token).await.unwrap();
    server.post_empty_auth(&follow_path, &alice.access_token).await.unwrap();

    let response = server
        .get_auth("/notifications", &bob.access_token)
        .await
        .unwrap();
    let inbox: NotificationListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(inbox.total, 1);
    assert_eq!(inbox.unread_count, 1);
    assert_eq!(inbox.notifications[0].notification_type, "follow");
    assert_eq!(inbox.notifications[0].message, "started following you");
    assert_eq!(inbox.notifications[0].actor.id, alice.user.id);

    let notification_id = inbox.notifications[0].id.clone();
    let response = server
        .put_empty_auth(
            &format!("/notifications/{notification_id}/read"),
            &alice.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .put_empty_auth(
            &format!("/notifications/{notification_id}/read"),
            &bob.access_token,
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth("/notifications/unread-count", &bob.access_token)
        .await
        .unwrap();
    let unread: UnreadCountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(unread.unread_count, 0);
}

#[tokio::test]
async fn test_comment_notifications_and_bulk_actions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let author = server.register_user().await.unwrap();
    let fan = server.register_user().await.unwrap();

    let response = server
        .post_auth("/posts", &author.access_token, &CreatePostRequest::original("hi"))
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Comments are never de-duplicated
    for text in ["one", "two"] {
        server
            .post_auth(
                &format!("/posts/{}/comments", post.id),
                &fan.access_token,
                &ContentRequest::new(text),
            )
            .await
            .unwrap();
    }
    // Self-comment produces nothing
    server
        .post_auth(
            &format!("/posts/{}/comments", post.id),
            &author.access_token,
            &ContentRequest::new("me"),
        )
        .await
        .unwrap();

    let response = server
        .get_auth("/notifications", &author.access_token)
        .await
        .unwrap();
    let inbox: NotificationListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(inbox.total, 2);
    assert!(inbox
        .notifications
        .iter()
        .all(|n| n.notification_type == "comment" && !n.is_read));

    let response = server
        .put_empty_auth("/notifications/read-all", &author.access_token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["updated"], 2);

    let response = server
        .delete_auth("/notifications/all", &author.access_token)
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["deleted"], 2);
}

// ============================================================================
// Search Tests
// ============================================================================

#[tokio::test]
async fn test_hashtag_search_and_posts() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let tag = format!("tag{}", unique_suffix());

    let response = server
        .post_auth(
            "/posts",
            &auth.access_token,
            &CreatePostRequest::original(format!("hello #{} world", tag.to_uppercase())),
        )
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/search/hashtags/{tag}/posts"))
        .await
        .unwrap();
    let tagged: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(tagged.contains(&post.id));

    let response = server
        .get(&format!("/search/hashtags?q=%23{tag}"))
        .await
        .unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    let found = body["hashtags"]
        .as_array()
        .unwrap()
        .iter()
        .find(|h| h["name"] == tag.as_str())
        .cloned()
        .unwrap();
    assert_eq!(found["posts_count"], 1);

    let response = server.get("/search/hashtags/neverusedtag0/posts").await.unwrap();
    let empty: PostListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(empty.total, 0);
}

#[tokio::test]
async fn test_search_all_total_counts_returned_items() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let tag = format!("many{}", unique_suffix());

    for n in 0..5 {
        server
            .post_auth(
                "/posts",
                &auth.access_token,
                &CreatePostRequest::original(format!("post {n} #{tag}")),
            )
            .await
            .unwrap();
    }

    let response = server.get(&format!("/search?q={tag}&limit=9")).await.unwrap();
    let all: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(all.posts.len(), 3);
    assert_eq!(
        all.total,
        (all.users.len() + all.posts.len() + all.hashtags.len()) as i64
    );
}

#[tokio::test]
async fn test_search_users_and_all() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let response = server
        .get(&format!("/search/users?q={}", auth.user.username.to_uppercase()))
        .await
        .unwrap();
    let users: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(users.users[0].id, auth.user.id);

    let response = server
        .get(&format!("/search?q={}", auth.user.username))
        .await
        .unwrap();
    let all: SearchResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(all.users.iter().any(|u| u.id == auth.user.id));
    assert!(all.total >= 1);

    let response = server.get("/search").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    // LIKE wildcards are matched literally
    let response = server.get("/search/users?q=%25").await.unwrap();
    let percent: UserListResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(percent.users.iter().all(|u| u.username.contains('%')));
}

// ============================================================================
// Media Tests
// ============================================================================

#[tokio::test]
async fn test_media_upload_attach_and_delete() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let owner = server.register_user().await.unwrap();
    let other = server.register_user().await.unwrap();

    let response = server
        .upload(&owner.access_token, "Pixel.PNG", TINY_PNG.to_vec())
        .await
        .unwrap();
    let uploaded: UploadResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(uploaded.media_type, "image");
    assert_eq!(uploaded.file_name, "Pixel.PNG");
    assert!(uploaded.url.contains("/uploads/images/"));
    assert!(uploaded.url.ends_with(".png"));

    // The stored file is served back
    let path = uploaded.url.trim_start_matches(&server.base_url()).to_string();
    let response = server.get(&path).await.unwrap();
    assert_eq!(response.bytes().await.unwrap().as_ref(), TINY_PNG);

    let response = server
        .post_auth(
            "/posts",
            &owner.access_token,
            &CreatePostRequest::original("with a picture").with_media(vec![uploaded.id.clone()]),
        )
        .await
        .unwrap();
    let post: PostResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(post.media.len(), 1);
    assert_eq!(post.media[0].id, uploaded.id);

    let response = server.get(&format!("/media/post/{}", post.id)).await.unwrap();
    let body: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(body["media"].as_array().unwrap().len(), 1);

    let media_path = format!("/media/{}", uploaded.id);
    let response = server.delete_auth(&media_path, &other.access_token).await.unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();

    let response = server.delete_auth(&media_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&media_path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // The file goes with the row
    let response = server.get(&path).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_media_upload_long_file_name() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();
    let file_name = format!("{}.png", "n".repeat(300));

    let response = server
        .upload(&auth.access_token, &file_name, TINY_PNG.to_vec())
        .await
        .unwrap();
    let uploaded: UploadResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(uploaded.file_name.chars().count(), 255);
    assert!(uploaded.file_name.ends_with(".png"));
    assert!(uploaded.url.ends_with(".png"));
}

#[tokio::test]
async fn test_media_upload_rejections() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let auth = server.register_user().await.unwrap();

    let response = server
        .upload(&auth.access_token, "notes.txt", b"plain text".to_vec())
        .await
        .unwrap();
    let code = assert_error(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(code, "UNSUPPORTED_MEDIA_TYPE");

    let response = server
        .upload(&auth.access_token, "empty.png", Vec::new())
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}
