#[cfg(test)]
pub const POSTS_JSON: &str = r##"{
  "posts": [
    {
      "id": "post-001",
      "title": "React Hooks: useLocalStorage",
      "description": "Sync local storage with React state",
      "content": "# useLocalStorage\n\nKeeps a value in local storage and in component state.\n\n- typed\n- SSR safe",
      "sourceCode": {
        "filename": "useLocalStorage.ts",
        "language": "typescript",
        "code": "import { useState } from 'react';\n\nexport function useLocalStorage<T>(key: string, initial: T) {\n  const [value, setValue] = useState<T>(initial);\n  return [value, setValue] as const;\n}",
        "fileExtension": ".ts",
        "detectedLanguage": "typescript"
      },
      "authorId": "user-001",
      "tags": ["react", "hooks", "typescript"],
      "likes": 42,
      "views": 320,
      "comments": 5,
      "isPublished": true,
      "createdAt": "2024-01-15T10:30:00Z",
      "updatedAt": "2024-01-15T10:30:00Z"
    },
    {
      "id": "post-002",
      "title": "Python async crawler",
      "description": "Crawl pages concurrently with asyncio",
      "content": "Uses aiohttp and hooks into the event loop.",
      "sourceCode": {
        "filename": "crawler.py",
        "language": "Python",
        "code": "import asyncio\n\nasync def main():\n    print('crawl')\n"
      },
      "authorId": "user-002",
      "tags": ["python", "async"],
      "likes": 87,
      "views": 150,
      "comments": 2,
      "isPublished": true,
      "createdAt": "2024-02-01T08:00:00Z",
      "updatedAt": "2024-02-03T08:00:00Z"
    },
    {
      "id": "post-003",
      "title": "Rust ownership cheatsheet",
      "description": "Borrowing rules on one page",
      "content": "Moves, borrows and lifetimes in a nutshell.",
      "sourceCode": {
        "filename": "main.rs",
        "language": "rust",
        "code": "fn main() {\n    let s = String::from(\"hi\");\n    println!(\"{}\", s);\n}",
        "fileExtension": ".rs",
        "detectedLanguage": "rust"
      },
      "authorId": "user-001",
      "tags": ["rust", "memory-safety"],
      "likes": 15,
      "views": 900,
      "comments": 0,
      "isPublished": true,
      "createdAt": "2023-12-20T12:00:00Z",
      "updatedAt": "2023-12-20T12:00:00Z"
    },
    {
      "id": "post-004",
      "title": "CSS Grid layout",
      "description": "Responsive grid without media queries",
      "content": "auto-fit and minmax do the heavy lifting.",
      "sourceCode": {
        "filename": "grid.scss",
        "language": "css",
        "code": ".grid {\n  display: grid;\n  grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));\n}"
      },
      "authorId": "user-003",
      "tags": ["css", "grid", "responsive", "frontend"],
      "likes": 23,
      "views": 410,
      "comments": 1,
      "isPublished": false,
      "createdAt": "2024-03-05T09:15:00+09:00",
      "updatedAt": "2024-03-05T09:15:00+09:00"
    },
    {
      "id": "post-005",
      "title": "Go worker pool",
      "description": "Bounded concurrency with channels",
      "content": "A fixed number of goroutines drain a jobs channel.",
      "sourceCode": {
        "filename": "pool.go",
        "language": "golang",
        "code": "package main\n\nfunc worker(jobs <-chan int) {\n\tfor j := range jobs {\n\t\t_ = j\n\t}\n}",
        "fileExtension": ".go",
        "detectedLanguage": "go"
      },
      "authorId": "user-002",
      "tags": ["go", "concurrency", "backend"],
      "likes": 64,
      "views": 75,
      "comments": 3,
      "isPublished": true,
      "createdAt": "2024-02-20T18:45:00Z",
      "updatedAt": "2024-02-21T07:00:00Z"
    }
  ]
}"##;

#[cfg(test)]
pub fn sample_posts() -> Vec<crate::post::Post> {
    let res: crate::post::PostsResponse = serde_json::from_str(POSTS_JSON).unwrap();
    res.posts
}

#[cfg(test)]
pub const TAGS_JSON: &str = r##"{
  "tags": [
    {
      "id": "tag-001",
      "name": "react",
      "description": "UI library for building components",
      "category": "framework",
      "color": "blue",
      "usageCount": 12,
      "createdAt": "2023-06-01"
    },
    {
      "id": "tag-002",
      "name": "Python",
      "description": "General purpose scripting language",
      "category": "language",
      "color": "green",
      "usageCount": 30,
      "createdAt": "2023-06-01T09:00:00Z"
    },
    {
      "id": "tag-003",
      "name": "rust",
      "description": "Systems programming language",
      "category": "language",
      "color": "orange",
      "usageCount": 8,
      "createdAt": "2023-07-10T00:00:00Z"
    },
    {
      "id": "tag-004",
      "name": "mystery",
      "category": "misc",
      "createdAt": "2023-08-01"
    }
  ]
}"##;

#[cfg(test)]
pub const USERS_JSON: &str = r##"{
  "users": [
    {
      "id": "user-001",
      "username": "taro",
      "displayName": "Taro Yamada",
      "avatar": "/avatars/taro.png",
      "bio": "Frontend developer",
      "location": "Tokyo",
      "website": "https://example.com/taro",
      "social": { "github": "taro" },
      "stats": { "posts": 2, "likes": 90, "followers": 120, "following": 30 },
      "badges": ["early-adopter"],
      "joinedAt": "2023-05-01",
      "lastActiveAt": "2024-03-01T12:00:00Z"
    },
    {
      "id": "user-002",
      "username": "hanako",
      "displayName": "Hanako Suzuki",
      "joinedAt": "2023-09-15T08:00:00Z",
      "lastActiveAt": "2024-02-28T18:30:00Z"
    }
  ]
}"##;
